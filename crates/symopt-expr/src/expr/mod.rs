//! Expression types.
//!
//! - `constant`, `variable`  atoms
//! - `monomial`, `polynomial`  terms
//! - `scalar`  the scalar sum type and promotion lattice
//! - `vector`, `matrix`  containers of one element kind
//! - `expression`  the closed set of all of the above

pub mod constant;
pub mod expression;
pub mod matrix;
pub mod monomial;
pub mod polynomial;
pub mod scalar;
pub mod variable;
pub mod vector;

pub use constant::Constant;
pub use expression::Expression;
pub use matrix::{ConstantMatrix, Matrix, MonomialMatrix, PolynomialMatrix, VariableMatrix};
pub use monomial::Monomial;
pub use polynomial::Polynomial;
pub use scalar::{Element, ScalarExpr, ScalarKind};
pub use variable::{Variable, VariableKind};
pub use vector::{ConstantVector, MonomialVector, PolynomialVector, VariableVector, Vector};
