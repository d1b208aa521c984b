use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constraint::scalar::ScalarConstraint;
use crate::constraint::sense::ComparisonSense;
use crate::constraint::{check_sides, element_at, elementwise, side_variables};
use crate::error::ExprError;
use crate::expr::expression::Expression;
use crate::expr::variable::Variable;
use crate::shape::{Form, Shape};

/// One scalar constraint per vector element. Either side may be a scalar
/// that is broadcast over the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorConstraint {
    left: Expression,
    right: Expression,
    sense: ComparisonSense,
    shape: Shape,
}

impl VectorConstraint {
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

    /// Number of scalar constraints.
    pub fn len(&self) -> usize {
        self.shape.rows
    }

    pub fn is_empty(&self) -> bool {
        self.shape.rows == 0
    }

    /// Both sides valid and broadcast-compatible with the recorded shape.
    pub fn check(&self) -> Result<(), ExprError> {
        check_sides(&self.left, &self.right, Form::Vector, self.shape)
    }

    /// Constraint on element `index`.
    pub fn at(&self, index: usize) -> Result<ScalarConstraint, ExprError> {
        element_at(&self.left, &self.right, self.sense, self.shape, index, 0)
    }

    pub fn constraints(&self) -> Vec<ScalarConstraint> {
        elementwise(&self.left, &self.right, self.sense, self.shape)
    }

    pub fn variables(&self) -> Vec<Variable> {
        side_variables(&self.left, &self.right)
    }

    pub fn is_linear(&self) -> bool {
        self.left.is_linear() && self.right.is_linear()
    }

    /// Truth value of every element constraint at `point`.
    pub fn evaluate(&self, point: &HashMap<Variable, f64>) -> Result<Vec<bool>, ExprError> {
        self.check()?;
        self.constraints()
            .iter()
            .map(|c| c.evaluate(point))
            .collect()
    }
}

impl std::fmt::Display for VectorConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.sense.symbol(), self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::ops::ExprOps;

    fn vector_constraint(c: crate::constraint::Constraint) -> VectorConstraint {
        VectorConstraint::try_from(c).unwrap()
    }

    #[test]
    fn scalar_side_is_broadcast() {
        let env = Environment::new("vector-constraint");
        let v = env.new_variable_vector(3);
        let c = vector_constraint(v.less_eq(2.0).unwrap());
        assert_eq!(c.len(), 3);
        let second = c.at(1).unwrap();
        assert_eq!(second.to_string(), "x_1 <= 2");
        assert!(matches!(
            c.at(3),
            Err(ExprError::IndexOutOfBounds { row: 3, col: 0, .. })
        ));
    }

    #[test]
    fn evaluate_elementwise() {
        let env = Environment::new("vector-constraint");
        let v = env.new_variable_vector(2);
        let c = vector_constraint(v.greater_eq(1.0).unwrap());
        let point = HashMap::from([(v[0], 0.0), (v[1], 3.0)]);
        assert_eq!(c.evaluate(&point), Ok(vec![false, true]));
    }

    #[test]
    fn sides_must_match_recorded_shape() {
        let env = Environment::new("vector-constraint");
        let bad = VectorConstraint::from_parts(
            Expression::from(env.new_variable_vector(3)),
            Expression::from(env.new_variable_vector(2)),
            ComparisonSense::LessEqual,
            Shape::column(3),
        );
        let expected = ExprError::VectorDimensionMismatch {
            operation: "comparison",
            left: Shape::column(3),
            right: Shape::column(2),
        };
        assert_eq!(bad.check(), Err(expected.clone()));
        assert_eq!(bad.linear_inequality_representation(None), Err(expected.clone()));
        assert_eq!(bad.evaluate(&HashMap::new()), Err(expected));
    }

    #[test]
    fn matching_sides_with_wrong_shape_are_rejected() {
        let env = Environment::new("vector-constraint");
        let bad = VectorConstraint::from_parts(
            Expression::from(env.new_variable_vector(2)),
            Expression::from(1.0),
            ComparisonSense::Equal,
            Shape::column(4),
        );
        assert_eq!(
            bad.check().unwrap_err().code(),
            "VECTOR_SHAPE_MISMATCH"
        );
    }
}
