use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constraint::scalar::ScalarConstraint;
use crate::constraint::sense::ComparisonSense;
use crate::constraint::{check_sides, element_at, elementwise, side_variables};
use crate::error::ExprError;
use crate::expr::expression::Expression;
use crate::expr::variable::Variable;
use crate::shape::{Form, Shape};

/// One scalar constraint per matrix entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixConstraint {
    left: Expression,
    right: Expression,
    sense: ComparisonSense,
    shape: Shape,
}

impl MatrixConstraint {
    pub(crate) fn from_parts(
        left: Expression,
        right: Expression,
        sense: ComparisonSense,
        shape: Shape,
    ) -> Self {
        Self {
            left,
            right,
            sense,
            shape,
        }
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Both sides valid and broadcast-compatible with the recorded shape.
    pub fn check(&self) -> Result<(), ExprError> {
        check_sides(&self.left, &self.right, Form::Matrix, self.shape)
    }

    pub fn at(&self, row: usize, col: usize) -> Result<ScalarConstraint, ExprError> {
        element_at(&self.left, &self.right, self.sense, self.shape, row, col)
    }

    /// Entry constraints in row-major order.
    pub fn constraints(&self) -> Vec<ScalarConstraint> {
        elementwise(&self.left, &self.right, self.sense, self.shape)
    }

    pub fn variables(&self) -> Vec<Variable> {
        side_variables(&self.left, &self.right)
    }

    pub fn is_linear(&self) -> bool {
        self.left.is_linear() && self.right.is_linear()
    }

    pub fn evaluate(&self, point: &HashMap<Variable, f64>) -> Result<Vec<bool>, ExprError> {
        self.check()?;
        self.constraints()
            .iter()
            .map(|c| c.evaluate(point))
            .collect()
    }
}

impl std::fmt::Display for MatrixConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.sense.symbol(), self.right)
    }
}
