//! Transposition.

use crate::error::{ExprError, Side};
use crate::expr::expression::Expression;
use crate::ops::grid::check_operand;

/// Swap rows and columns. Scalars are returned unchanged; a vector becomes a
/// `1xn` matrix.
pub fn transpose(expr: &Expression) -> Result<Expression, ExprError> {
    check_operand("transpose", Side::Left, expr)?;
    Ok(match expr {
        Expression::Constant(_)
        | Expression::Variable(_)
        | Expression::Monomial(_)
        | Expression::Polynomial(_) => expr.clone(),
        Expression::ConstantVector(v) => Expression::ConstantMatrix(v.transposed()),
        Expression::VariableVector(v) => Expression::VariableMatrix(v.transposed()),
        Expression::MonomialVector(v) => Expression::MonomialMatrix(v.transposed()),
        Expression::PolynomialVector(v) => Expression::PolynomialMatrix(v.transposed()),
        Expression::ConstantMatrix(m) => Expression::ConstantMatrix(m.transposed()),
        Expression::VariableMatrix(m) => Expression::VariableMatrix(m.transposed()),
        Expression::MonomialMatrix(m) => Expression::MonomialMatrix(m.transposed()),
        Expression::PolynomialMatrix(m) => Expression::PolynomialMatrix(m.transposed()),
    })
}
