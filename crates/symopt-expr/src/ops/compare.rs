//! Building constraints from two expressions.

use crate::constraint::{
    ComparisonSense, Constraint, MatrixConstraint, ScalarConstraint, VectorConstraint,
};
use crate::error::ExprError;
use crate::expr::expression::Expression;
use crate::ops::grid::{Grid, check_operands, elementwise_layout};
use crate::shape::Form;

/// `left <sense> right`. The constraint keeps both operands as given; its
/// form is the broadcast form of the operands.
pub fn compare(
    left: &Expression,
    right: &Expression,
    sense: ComparisonSense,
) -> Result<Constraint, ExprError> {
    check_operands("comparison", left, right)?;
    let (form, shape) = elementwise_layout("comparison", &Grid::of(left), &Grid::of(right))?;
    Ok(match form {
        Form::Scalar => match (left.to_scalar(), right.to_scalar()) {
            (Some(l), Some(r)) => Constraint::Scalar(ScalarConstraint::new(l, r, sense)),
            _ => {
                return Err(ExprError::UnsupportedInput {
                    function: "comparison",
                    input: format!("{} and {}", left.type_name(), right.type_name()),
                });
            }
        },
        Form::Vector => Constraint::Vector(VectorConstraint::from_parts(
            left.clone(),
            right.clone(),
            sense,
            shape,
        )),
        Form::Matrix => Constraint::Matrix(MatrixConstraint::from_parts(
            left.clone(),
            right.clone(),
            sense,
            shape,
        )),
    })
}
