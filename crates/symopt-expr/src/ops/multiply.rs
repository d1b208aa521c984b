//! Scalar products, scaling and matrix products.

use crate::error::ExprError;
use crate::expr::constant::Constant;
use crate::expr::expression::Expression;
use crate::expr::scalar::ScalarExpr;
use crate::ops::grid::{Grid, check_operands, combine_elementwise, shape_mismatch};
use crate::ops::plus::scalar_plus;
use crate::shape::{Form, Shape};

/// Product of two scalars, distributing over polynomials left-major.
pub(crate) fn scalar_multiply(left: &ScalarExpr, right: &ScalarExpr) -> ScalarExpr {
    if let (ScalarExpr::Constant(a), ScalarExpr::Constant(b)) = (left, right) {
        return ScalarExpr::Constant(Constant(a.0 * b.0));
    }
    match (left.as_monomial(), right.as_monomial()) {
        (Some(a), Some(b)) => ScalarExpr::Monomial(a.times(&b)),
        _ => ScalarExpr::Polynomial(left.to_polynomial().distribute(&right.to_monomials())),
    }
}

/// `left * right`.
///
/// A scalar operand scales every element of the other one. Otherwise this is
/// the matrix product; vectors are `nx1` matrices. Each product entry is
/// simplified, a `1x1` result is returned as a scalar and an `nx1` result as
/// a vector.
pub fn multiply(left: &Expression, right: &Expression) -> Result<Expression, ExprError> {
    check_operands("multiply", left, right)?;
    let (l, r) = (Grid::of(left), Grid::of(right));
    if l.form == Form::Scalar || r.form == Form::Scalar {
        return combine_elementwise("multiply", &l, &r, scalar_multiply);
    }
    if l.shape.cols != r.shape.rows {
        return Err(shape_mismatch("multiply", l.form, r.form, l.shape, r.shape));
    }

    let (rows, inner, cols) = (l.shape.rows, l.shape.cols, r.shape.cols);
    let mut elements = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let entry = (0..inner)
                .map(|k| scalar_multiply(&l.elements[i * inner + k], &r.elements[k * cols + j]))
                .reduce(|acc, term| scalar_plus(&acc, &term))
                .map(|sum| sum.simplified())
                .unwrap_or(ScalarExpr::Constant(Constant::ZERO));
            elements.push(entry);
        }
    }

    let form = match (rows, cols) {
        (1, 1) => Form::Scalar,
        (_, 1) => Form::Vector,
        _ => Form::Matrix,
    };
    Grid::new(form, Shape::new(rows, cols), elements).into_expression()
}
