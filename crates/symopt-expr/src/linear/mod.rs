//! Linear structure of expressions and constraints.
//!
//! - `coefficients`  coefficient vectors and matrices of linear expressions
//! - `representation`  simplified constraints and `A x <sense> b` forms
//! - `implication`  bound implication between single-variable constraints

pub mod coefficients;
pub mod implication;
pub mod representation;

pub use representation::{LinearForm, LinearSystem};
