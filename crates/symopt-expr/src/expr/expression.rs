//! The closed set of expression kinds.

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::expr::constant::Constant;
use crate::expr::matrix::Matrix;
use crate::expr::monomial::Monomial;
use crate::expr::polynomial::Polynomial;
use crate::expr::scalar::{ScalarExpr, ScalarKind};
use crate::expr::variable::{Variable, unique_variables};
use crate::expr::vector::Vector;
use crate::shape::{Form, Shape};

/// Any expression: one variant per scalar kind and container form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Constant(Constant),
    Variable(Variable),
    Monomial(Monomial),
    Polynomial(Polynomial),
    ConstantVector(Vector<Constant>),
    VariableVector(Vector<Variable>),
    MonomialVector(Vector<Monomial>),
    PolynomialVector(Vector<Polynomial>),
    ConstantMatrix(Matrix<Constant>),
    VariableMatrix(Matrix<Variable>),
    MonomialMatrix(Matrix<Monomial>),
    PolynomialMatrix(Matrix<Polynomial>),
}

/// Apply the same body to the element container of every non-scalar variant
/// and to the scalar itself otherwise.
macro_rules! dispatch {
    ($expr:expr, scalar $s:ident => $scalar:expr, container $c:ident => $container:expr) => {
        match $expr {
            Expression::Constant(k) => {
                let $s = ScalarExpr::Constant(*k);
                $scalar
            }
            Expression::Variable(v) => {
                let $s = ScalarExpr::Variable(*v);
                $scalar
            }
            Expression::Monomial(m) => {
                let $s = ScalarExpr::Monomial(m.clone());
                $scalar
            }
            Expression::Polynomial(p) => {
                let $s = ScalarExpr::Polynomial(p.clone());
                $scalar
            }
            Expression::ConstantVector($c) => $container,
            Expression::VariableVector($c) => $container,
            Expression::MonomialVector($c) => $container,
            Expression::PolynomialVector($c) => $container,
            Expression::ConstantMatrix($c) => $container,
            Expression::VariableMatrix($c) => $container,
            Expression::MonomialMatrix($c) => $container,
            Expression::PolynomialMatrix($c) => $container,
        }
    };
}

impl Expression {
    pub fn form(&self) -> Form {
        match self {
            Expression::Constant(_)
            | Expression::Variable(_)
            | Expression::Monomial(_)
            | Expression::Polynomial(_) => Form::Scalar,
            Expression::ConstantVector(_)
            | Expression::VariableVector(_)
            | Expression::MonomialVector(_)
            | Expression::PolynomialVector(_) => Form::Vector,
            Expression::ConstantMatrix(_)
            | Expression::VariableMatrix(_)
            | Expression::MonomialMatrix(_)
            | Expression::PolynomialMatrix(_) => Form::Matrix,
        }
    }

    /// Kind of the scalar elements.
    pub fn scalar_kind(&self) -> ScalarKind {
        match self {
            Expression::Constant(_) | Expression::ConstantVector(_) | Expression::ConstantMatrix(_) => {
                ScalarKind::Constant
            }
            Expression::Variable(_) | Expression::VariableVector(_) | Expression::VariableMatrix(_) => {
                ScalarKind::Variable
            }
            Expression::Monomial(_) | Expression::MonomialVector(_) | Expression::MonomialMatrix(_) => {
                ScalarKind::Monomial
            }
            Expression::Polynomial(_)
            | Expression::PolynomialVector(_)
            | Expression::PolynomialMatrix(_) => ScalarKind::Polynomial,
        }
    }

    /// Name of the variant, used in error payloads.
    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Constant(_) => "Constant",
            Expression::Variable(_) => "Variable",
            Expression::Monomial(_) => "Monomial",
            Expression::Polynomial(_) => "Polynomial",
            Expression::ConstantVector(_) => "ConstantVector",
            Expression::VariableVector(_) => "VariableVector",
            Expression::MonomialVector(_) => "MonomialVector",
            Expression::PolynomialVector(_) => "PolynomialVector",
            Expression::ConstantMatrix(_) => "ConstantMatrix",
            Expression::VariableMatrix(_) => "VariableMatrix",
            Expression::MonomialMatrix(_) => "MonomialMatrix",
            Expression::PolynomialMatrix(_) => "PolynomialMatrix",
        }
    }

    /// `(rows, cols)`; scalars are `1x1` and vectors `nx1`.
    pub fn dims(&self) -> Shape {
        dispatch!(self, scalar _s => Shape::SCALAR, container c => c.shape())
    }

    pub fn is_scalar(&self) -> bool {
        self.form() == Form::Scalar
    }

    pub fn check(&self) -> Result<(), ExprError> {
        match self {
            Expression::Constant(k) => k.check(),
            Expression::Variable(v) => v.check(),
            Expression::Monomial(m) => m.check(),
            Expression::Polynomial(p) => p.check(),
            Expression::ConstantVector(c) => c.check(),
            Expression::VariableVector(c) => c.check(),
            Expression::MonomialVector(c) => c.check(),
            Expression::PolynomialVector(c) => c.check(),
            Expression::ConstantMatrix(c) => c.check(),
            Expression::VariableMatrix(c) => c.check(),
            Expression::MonomialMatrix(c) => c.check(),
            Expression::PolynomialMatrix(c) => c.check(),
        }
    }

    /// The scalar held by a scalar-form expression.
    pub fn to_scalar(&self) -> Option<ScalarExpr> {
        match self {
            Expression::Constant(k) => Some(ScalarExpr::Constant(*k)),
            Expression::Variable(v) => Some(ScalarExpr::Variable(*v)),
            Expression::Monomial(m) => Some(ScalarExpr::Monomial(m.clone())),
            Expression::Polynomial(p) => Some(ScalarExpr::Polynomial(p.clone())),
            _ => None,
        }
    }

    /// All elements in row-major order; a scalar yields itself.
    pub fn to_scalars(&self) -> Vec<ScalarExpr> {
        dispatch!(
            self,
            scalar s => vec![s],
            container c => c.elements().iter().map(|e| e.clone().into()).collect()
        )
    }

    /// Element at `(row, col)`. Scalars only answer `(0, 0)`.
    pub fn at(&self, row: usize, col: usize) -> Result<ScalarExpr, ExprError> {
        let shape = self.dims();
        if row >= shape.rows || col >= shape.cols {
            return Err(ExprError::IndexOutOfBounds { row, col, shape });
        }
        Ok(dispatch!(
            self,
            scalar s => s,
            container c => c.elements()[row * shape.cols + col].clone().into()
        ))
    }

    /// Distinct variables in row-major first-seen order.
    pub fn variables(&self) -> Vec<Variable> {
        unique_variables(self.to_scalars().iter().flat_map(ScalarExpr::variables))
    }

    /// Highest degree over all elements.
    pub fn degree(&self) -> u32 {
        self.to_scalars()
            .iter()
            .map(ScalarExpr::degree)
            .max()
            .unwrap_or(0)
    }

    pub fn is_linear(&self) -> bool {
        self.to_scalars().iter().all(ScalarExpr::is_linear)
    }

    /// Constant term of every element, row-major.
    pub fn constant_terms(&self) -> Vec<f64> {
        self.to_scalars().iter().map(ScalarExpr::constant).collect()
    }
}

impl From<ScalarExpr> for Expression {
    fn from(value: ScalarExpr) -> Self {
        match value {
            ScalarExpr::Constant(k) => Expression::Constant(k),
            ScalarExpr::Variable(v) => Expression::Variable(v),
            ScalarExpr::Monomial(m) => Expression::Monomial(m),
            ScalarExpr::Polynomial(p) => Expression::Polynomial(p),
        }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Constant(Constant(value))
    }
}

impl TryFrom<Expression> for ScalarExpr {
    type Error = ExprError;

    fn try_from(value: Expression) -> Result<Self, Self::Error> {
        match value {
            Expression::Constant(k) => Ok(ScalarExpr::Constant(k)),
            Expression::Variable(v) => Ok(ScalarExpr::Variable(v)),
            Expression::Monomial(m) => Ok(ScalarExpr::Monomial(m)),
            Expression::Polynomial(p) => Ok(ScalarExpr::Polynomial(p)),
            other => Err(ExprError::UnsupportedInput {
                function: "ScalarExpr::try_from",
                input: other.type_name().to_string(),
            }),
        }
    }
}

/// `From<T> for Expression` and `TryFrom<Expression> for T` for every variant.
macro_rules! expression_variant {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Expression {
            fn from(value: $ty) -> Self {
                Expression::$variant(value)
            }
        }

        impl TryFrom<Expression> for $ty {
            type Error = ExprError;

            fn try_from(value: Expression) -> Result<Self, Self::Error> {
                match value {
                    Expression::$variant(inner) => Ok(inner),
                    other => Err(ExprError::UnsupportedInput {
                        function: concat!(stringify!($variant), "::try_from"),
                        input: other.type_name().to_string(),
                    }),
                }
            }
        }
    };
}

expression_variant!(Constant, Constant);
expression_variant!(Variable, Variable);
expression_variant!(Monomial, Monomial);
expression_variant!(Polynomial, Polynomial);
expression_variant!(ConstantVector, Vector<Constant>);
expression_variant!(VariableVector, Vector<Variable>);
expression_variant!(MonomialVector, Vector<Monomial>);
expression_variant!(PolynomialVector, Vector<Polynomial>);
expression_variant!(ConstantMatrix, Matrix<Constant>);
expression_variant!(VariableMatrix, Matrix<Variable>);
expression_variant!(MonomialMatrix, Matrix<Monomial>);
expression_variant!(PolynomialMatrix, Matrix<Polynomial>);

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Constant(k) => write!(f, "{k}"),
            Expression::Variable(v) => write!(f, "{v}"),
            Expression::Monomial(m) => write!(f, "{m}"),
            Expression::Polynomial(p) => write!(f, "{p}"),
            Expression::ConstantVector(c) => write!(f, "{c}"),
            Expression::VariableVector(c) => write!(f, "{c}"),
            Expression::MonomialVector(c) => write!(f, "{c}"),
            Expression::PolynomialVector(c) => write!(f, "{c}"),
            Expression::ConstantMatrix(c) => write!(f, "{c}"),
            Expression::VariableMatrix(c) => write!(f, "{c}"),
            Expression::MonomialMatrix(c) => write!(f, "{c}"),
            Expression::PolynomialMatrix(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;

    #[test]
    fn dims_by_form() {
        let env = Environment::new("expression");
        assert_eq!(Expression::from(2.0).dims(), Shape::SCALAR);
        let v = Expression::from(env.new_variable_vector(4));
        assert_eq!(v.dims(), Shape::new(4, 1));
        assert_eq!(v.form(), Form::Vector);
        let m = Expression::from(env.new_variable_matrix(2, 3));
        assert_eq!(m.dims(), Shape::new(2, 3));
        assert_eq!(m.type_name(), "VariableMatrix");
    }

    #[test]
    fn try_from_reports_actual_variant() {
        let env = Environment::new("expression");
        let expr = Expression::from(env.new_variable());
        let err = Polynomial::try_from(expr.clone()).unwrap_err();
        assert_eq!(
            err,
            ExprError::UnsupportedInput {
                function: "Polynomial::try_from",
                input: "Variable".to_string()
            }
        );
        assert!(Variable::try_from(expr).is_ok());
    }

    #[test]
    fn at_indexes_row_major() {
        let env = Environment::new("expression");
        let m = env.new_variable_matrix(2, 2);
        let expected = *m.at(1, 0).unwrap();
        let expr = Expression::from(m);
        assert_eq!(expr.at(1, 0), Ok(ScalarExpr::Variable(expected)));
        assert!(matches!(
            expr.at(0, 2),
            Err(ExprError::IndexOutOfBounds { row: 0, col: 2, .. })
        ));
    }

    #[test]
    fn variables_are_deduplicated() {
        let env = Environment::new("expression");
        let x = env.new_variable();
        let y = env.new_variable();
        let v = Vector::new(vec![
            Polynomial::new(vec![Monomial::term(y, 1.0), Monomial::term(x, 1.0)]),
            Polynomial::from(y),
        ]);
        assert_eq!(Expression::from(v).variables(), vec![y, x]);
    }

    #[test]
    fn check_delegates_to_variant() {
        let v: Vector<Constant> = Vector::new(Vec::new());
        assert_eq!(Expression::from(v).check(), Err(ExprError::EmptyVector));
        assert!(Expression::from(1.0).check().is_ok());
    }
}
