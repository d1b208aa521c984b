//! Real-valued constants.

use serde::{Deserialize, Serialize};

use crate::error::ExprError;

/// A single real number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constant(pub f64);

impl Constant {
    pub const ZERO: Constant = Constant(0.0);
    pub const ONE: Constant = Constant(1.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Constants are always well-defined.
    pub fn check(&self) -> Result<(), ExprError> {
        Ok(())
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Constant> for f64 {
    fn from(value: Constant) -> Self {
        value.0
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
