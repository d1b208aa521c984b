//! Constraints: two expressions related by a comparison sense.

pub mod matrix;
pub mod scalar;
pub mod sense;
pub mod vector;

pub use matrix::MatrixConstraint;
pub use scalar::ScalarConstraint;
pub use sense::ComparisonSense;
pub use vector::VectorConstraint;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::expr::expression::Expression;
use crate::expr::scalar::ScalarExpr;
use crate::expr::variable::{Variable, unique_variables};
use crate::ops::grid::Grid;
use crate::shape::{Form, Shape};

/// A constraint of any form, as produced by the comparison operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    Scalar(ScalarConstraint),
    Vector(VectorConstraint),
    Matrix(MatrixConstraint),
}

impl Constraint {
    pub fn form(&self) -> Form {
        match self {
            Constraint::Scalar(_) => Form::Scalar,
            Constraint::Vector(_) => Form::Vector,
            Constraint::Matrix(_) => Form::Matrix,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Constraint::Scalar(_) => Shape::SCALAR,
            Constraint::Vector(c) => c.shape(),
            Constraint::Matrix(c) => c.shape(),
        }
    }

    pub fn sense(&self) -> ComparisonSense {
        match self {
            Constraint::Scalar(c) => c.sense(),
            Constraint::Vector(c) => c.sense(),
            Constraint::Matrix(c) => c.sense(),
        }
    }

    pub fn check(&self) -> Result<(), ExprError> {
        match self {
            Constraint::Scalar(c) => c.check(),
            Constraint::Vector(c) => c.check(),
            Constraint::Matrix(c) => c.check(),
        }
    }

    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Constraint::Scalar(c) => c.variables(),
            Constraint::Vector(c) => c.variables(),
            Constraint::Matrix(c) => c.variables(),
        }
    }

    pub fn is_linear(&self) -> bool {
        match self {
            Constraint::Scalar(c) => c.is_linear(),
            Constraint::Vector(c) => c.is_linear(),
            Constraint::Matrix(c) => c.is_linear(),
        }
    }

    /// Element constraints in row-major order.
    pub fn constraints(&self) -> Vec<ScalarConstraint> {
        match self {
            Constraint::Scalar(c) => vec![c.clone()],
            Constraint::Vector(c) => c.constraints(),
            Constraint::Matrix(c) => c.constraints(),
        }
    }

    /// Whether every element constraint holds at `point`.
    pub fn is_satisfied(&self, point: &HashMap<Variable, f64>) -> Result<bool, ExprError> {
        for c in self.constraints() {
            if !c.evaluate(point)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl From<ScalarConstraint> for Constraint {
    fn from(value: ScalarConstraint) -> Self {
        Constraint::Scalar(value)
    }
}

impl From<VectorConstraint> for Constraint {
    fn from(value: VectorConstraint) -> Self {
        Constraint::Vector(value)
    }
}

impl From<MatrixConstraint> for Constraint {
    fn from(value: MatrixConstraint) -> Self {
        Constraint::Matrix(value)
    }
}

impl TryFrom<Constraint> for ScalarConstraint {
    type Error = ExprError;

    fn try_from(value: Constraint) -> Result<Self, Self::Error> {
        match value {
            Constraint::Scalar(c) => Ok(c),
            other => Err(unexpected_form("ScalarConstraint::try_from", other.form())),
        }
    }
}

impl TryFrom<Constraint> for VectorConstraint {
    type Error = ExprError;

    fn try_from(value: Constraint) -> Result<Self, Self::Error> {
        match value {
            Constraint::Vector(c) => Ok(c),
            other => Err(unexpected_form("VectorConstraint::try_from", other.form())),
        }
    }
}

impl TryFrom<Constraint> for MatrixConstraint {
    type Error = ExprError;

    fn try_from(value: Constraint) -> Result<Self, Self::Error> {
        match value {
            Constraint::Matrix(c) => Ok(c),
            other => Err(unexpected_form("MatrixConstraint::try_from", other.form())),
        }
    }
}

fn unexpected_form(function: &'static str, form: Form) -> ExprError {
    ExprError::UnsupportedInput {
        function,
        input: format!("{} constraint", form.as_str()),
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Scalar(c) => write!(f, "{c}"),
            Constraint::Vector(c) => write!(f, "{c}"),
            Constraint::Matrix(c) => write!(f, "{c}"),
        }
    }
}

/// Both sides valid, and each either a scalar or of exactly `shape`.
pub(crate) fn check_sides(
    left: &Expression,
    right: &Expression,
    form: Form,
    shape: Shape,
) -> Result<(), ExprError> {
    left.check()?;
    right.check()?;
    let fits = |side: &Expression| side.is_scalar() || side.dims() == shape;
    if fits(left) && fits(right) {
        return Ok(());
    }
    let (l, r) = if left.dims() == right.dims() {
        (left.dims(), shape)
    } else {
        (left.dims(), right.dims())
    };
    Err(match form {
        Form::Matrix => ExprError::MatrixDimensionMismatch {
            operation: "comparison",
            left: l,
            right: r,
        },
        Form::Scalar | Form::Vector => ExprError::VectorDimensionMismatch {
            operation: "comparison",
            left: l,
            right: r,
        },
    })
}

/// Broadcast both sides and pair their elements. Assumes [`check_sides`]
/// holds.
pub(crate) fn elementwise(
    left: &Expression,
    right: &Expression,
    sense: ComparisonSense,
    shape: Shape,
) -> Vec<ScalarConstraint> {
    let (l, r) = (Grid::of(left), Grid::of(right));
    (0..shape.len())
        .map(|idx| ScalarConstraint::new(l.broadcast(idx).clone(), r.broadcast(idx).clone(), sense))
        .collect()
}

pub(crate) fn element_at(
    left: &Expression,
    right: &Expression,
    sense: ComparisonSense,
    shape: Shape,
    row: usize,
    col: usize,
) -> Result<ScalarConstraint, ExprError> {
    if row >= shape.rows || col >= shape.cols {
        return Err(ExprError::IndexOutOfBounds { row, col, shape });
    }
    let pick = |side: &Expression| -> Result<ScalarExpr, ExprError> {
        if side.is_scalar() {
            side.at(0, 0)
        } else {
            side.at(row, col)
        }
    };
    Ok(ScalarConstraint::new(pick(left)?, pick(right)?, sense))
}

pub(crate) fn side_variables(left: &Expression, right: &Expression) -> Vec<Variable> {
    unique_variables(left.variables().into_iter().chain(right.variables()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::ops::ExprOps;

    #[test]
    fn try_from_rejects_other_forms() {
        let env = Environment::new("constraint");
        let v = env.new_variable_vector(2);
        let c = v.less_eq(1.0).unwrap();
        let err = ScalarConstraint::try_from(c).unwrap_err();
        assert_eq!(
            err,
            ExprError::UnsupportedInput {
                function: "ScalarConstraint::try_from",
                input: "vector constraint".to_string()
            }
        );
    }

    #[test]
    fn is_satisfied_requires_all_elements() {
        let env = Environment::new("constraint");
        let v = env.new_variable_vector(2);
        let c = v.less_eq(1.0).unwrap();
        let inside = HashMap::from([(v[0], 0.0), (v[1], 1.0)]);
        let outside = HashMap::from([(v[0], 0.0), (v[1], 1.5)]);
        assert_eq!(c.is_satisfied(&inside), Ok(true));
        assert_eq!(c.is_satisfied(&outside), Ok(false));
    }

    #[test]
    fn variables_span_both_sides() {
        let env = Environment::new("constraint");
        let x = env.new_variable();
        let y = env.new_variable();
        let c = x.greater_eq(y).unwrap();
        assert_eq!(c.variables(), vec![x, y]);
        assert_eq!(c.form(), Form::Scalar);
    }
}
