//! Decision variables.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::ExprError;
use crate::ids::VariableId;

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VariableKind {
    #[default]
    Continuous,
    Binary,
    Integer,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Continuous => "continuous",
            VariableKind::Binary => "binary",
            VariableKind::Integer => "integer",
        }
    }
}

/// An unknown quantity identified by its id.
///
/// Kind and bounds are carried along for a solver layer; equality, ordering
/// and hashing only look at the id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Variable {
    id: VariableId,
    kind: VariableKind,
    #[serde(with = "lower_bound")]
    lower: f64,
    #[serde(with = "upper_bound")]
    upper: f64,
}

/// Infinite bounds are written as `null`, which JSON can represent.
fn serialize_bound<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(value)
    }
}

fn deserialize_bound<'de, D: Deserializer<'de>>(
    deserializer: D,
    unbounded: f64,
) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(unbounded))
}

mod lower_bound {
    use serde::{Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        super::serialize_bound(value, serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        super::deserialize_bound(deserializer, f64::NEG_INFINITY)
    }
}

mod upper_bound {
    use serde::{Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        super::serialize_bound(value, serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        super::deserialize_bound(deserializer, f64::INFINITY)
    }
}

impl Variable {
    pub(crate) fn allocated(id: VariableId, kind: VariableKind, lower: f64, upper: f64) -> Self {
        Self {
            id,
            kind,
            lower,
            upper,
        }
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Fails for variables that were not allocated by an environment.
    pub fn check(&self) -> Result<(), ExprError> {
        if self.id.is_defined() {
            Ok(())
        } else {
            Err(ExprError::UndefinedVariable)
        }
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self {
            id: VariableId::UNDEFINED,
            kind: VariableKind::Continuous,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x_{}", self.id)
    }
}

/// Distinct variables of `vars` in first-seen order.
pub(crate) fn unique_variables<I>(vars: I) -> Vec<Variable>
where
    I: IntoIterator<Item = Variable>,
{
    let mut seen = std::collections::HashSet::new();
    vars.into_iter().filter(|v| seen.insert(v.id)).collect()
}
