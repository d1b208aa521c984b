//! Symbolic expressions for optimization modeling.
//!
//! Variables, monomials and polynomials, their vector and matrix forms,
//! arithmetic with kind promotion, constraints and linear extraction.

mod calculus;
pub mod constraint;
mod dense;
pub mod env;
pub mod error;
pub mod expr;
pub mod ids;
pub mod linear;
pub mod ops;
pub mod shape;
mod simplify;

pub use constraint::{
    ComparisonSense, Constraint, MatrixConstraint, ScalarConstraint, VectorConstraint,
};
pub use env::Environment;
pub use error::{ExprError, Side};
pub use expr::{
    Constant, ConstantMatrix, ConstantVector, Element, Expression, Matrix, Monomial,
    MonomialMatrix, MonomialVector, Polynomial, PolynomialMatrix, PolynomialVector, ScalarExpr,
    ScalarKind, Variable, VariableKind, VariableMatrix, VariableVector, Vector,
};
pub use ids::VariableId;
pub use linear::{LinearForm, LinearSystem};
pub use ops::ExprOps;
pub use shape::{Form, Shape};
