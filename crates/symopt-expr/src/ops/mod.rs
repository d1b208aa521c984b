//! Arithmetic and comparison with kind promotion and shape broadcasting.
//!
//! Every operation validates its operands first, then checks shapes, then
//! combines elements. Results take the least general kind that can hold all
//! element results.

pub mod compare;
pub(crate) mod grid;
pub mod multiply;
pub mod plus;
pub mod transpose;

pub use compare::compare;
pub use multiply::multiply;
pub use plus::{minus, plus};
pub use transpose::transpose;

use crate::constraint::{ComparisonSense, Constraint};
use crate::error::ExprError;
use crate::expr::expression::Expression;

/// Operators available on every expression type.
///
/// The right operand may be anything convertible into an [`Expression`],
/// including plain `f64` values.
pub trait ExprOps {
    fn to_expression(&self) -> Expression;

    fn plus(&self, rhs: impl Into<Expression>) -> Result<Expression, ExprError> {
        plus::plus(&self.to_expression(), &rhs.into())
    }

    fn minus(&self, rhs: impl Into<Expression>) -> Result<Expression, ExprError> {
        plus::minus(&self.to_expression(), &rhs.into())
    }

    fn multiply(&self, rhs: impl Into<Expression>) -> Result<Expression, ExprError> {
        multiply::multiply(&self.to_expression(), &rhs.into())
    }

    fn transpose(&self) -> Result<Expression, ExprError> {
        transpose::transpose(&self.to_expression())
    }

    fn comparison(
        &self,
        rhs: impl Into<Expression>,
        sense: ComparisonSense,
    ) -> Result<Constraint, ExprError> {
        compare::compare(&self.to_expression(), &rhs.into(), sense)
    }

    fn less_eq(&self, rhs: impl Into<Expression>) -> Result<Constraint, ExprError> {
        self.comparison(rhs, ComparisonSense::LessEqual)
    }

    fn greater_eq(&self, rhs: impl Into<Expression>) -> Result<Constraint, ExprError> {
        self.comparison(rhs, ComparisonSense::GreaterEqual)
    }

    fn equals(&self, rhs: impl Into<Expression>) -> Result<Constraint, ExprError> {
        self.comparison(rhs, ComparisonSense::Equal)
    }
}

impl<T: Clone + Into<Expression>> ExprOps for T {
    fn to_expression(&self) -> Expression {
        self.clone().into()
    }
}
