use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constraint::sense::ComparisonSense;
use crate::error::ExprError;
use crate::expr::scalar::ScalarExpr;
use crate::expr::variable::{Variable, unique_variables};

/// `left <sense> right` between two scalar expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarConstraint {
    left: ScalarExpr,
    right: ScalarExpr,
    sense: ComparisonSense,
}

impl ScalarConstraint {
    pub fn new(
        left: impl Into<ScalarExpr>,
        right: impl Into<ScalarExpr>,
        sense: ComparisonSense,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            sense,
        }
    }

    pub fn left(&self) -> &ScalarExpr {
        &self.left
    }

    pub fn right(&self) -> &ScalarExpr {
        &self.right
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn into_parts(self) -> (ScalarExpr, ComparisonSense, ScalarExpr) {
        (self.left, self.sense, self.right)
    }

    /// Both sides valid, left first.
    pub fn check(&self) -> Result<(), ExprError> {
        self.left.check()?;
        self.right.check()
    }

    /// Variables of the left side, then the ones only on the right.
    pub fn variables(&self) -> Vec<Variable> {
        unique_variables(
            self.left
                .variables()
                .into_iter()
                .chain(self.right.variables()),
        )
    }

    pub fn is_linear(&self) -> bool {
        self.left.is_linear() && self.right.is_linear()
    }

    /// Truth value at `point`.
    pub fn evaluate(&self, point: &HashMap<Variable, f64>) -> Result<bool, ExprError> {
        self.check()?;
        let lhs = self.left.evaluate(point)?;
        let rhs = self.right.evaluate(point)?;
        Ok(self.sense.holds(lhs, rhs))
    }
}

impl std::fmt::Display for ScalarConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.sense.symbol(), self.right)
    }
}
