//! Scalar expressions and the kind lattice used for promotion.

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::expr::constant::Constant;
use crate::expr::monomial::Monomial;
use crate::expr::polynomial::Polynomial;
use crate::expr::variable::Variable;

/// Scalar kinds ordered from least to most general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarKind {
    Constant,
    Variable,
    Monomial,
    Polynomial,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Constant => "Constant",
            ScalarKind::Variable => "Variable",
            ScalarKind::Monomial => "Monomial",
            ScalarKind::Polynomial => "Polynomial",
        }
    }

    /// Least general kind able to hold values of both kinds.
    ///
    /// A constant cannot be stored as a variable (nor the other way round),
    /// so the two meet at `Monomial`.
    pub fn join(self, other: ScalarKind) -> ScalarKind {
        match (self, other) {
            (ScalarKind::Constant, ScalarKind::Variable)
            | (ScalarKind::Variable, ScalarKind::Constant) => ScalarKind::Monomial,
            (a, b) => a.max(b),
        }
    }
}

/// One of the four scalar kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarExpr {
    Constant(Constant),
    Variable(Variable),
    Monomial(Monomial),
    Polynomial(Polynomial),
}

impl ScalarExpr {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarExpr::Constant(_) => ScalarKind::Constant,
            ScalarExpr::Variable(_) => ScalarKind::Variable,
            ScalarExpr::Monomial(_) => ScalarKind::Monomial,
            ScalarExpr::Polynomial(_) => ScalarKind::Polynomial,
        }
    }

    pub fn check(&self) -> Result<(), ExprError> {
        match self {
            ScalarExpr::Constant(k) => k.check(),
            ScalarExpr::Variable(v) => v.check(),
            ScalarExpr::Monomial(m) => m.check(),
            ScalarExpr::Polynomial(p) => p.check(),
        }
    }

    /// Monomials making up this expression.
    pub fn to_monomials(&self) -> Vec<Monomial> {
        match self {
            ScalarExpr::Constant(k) => vec![Monomial::from(*k)],
            ScalarExpr::Variable(v) => vec![Monomial::from(*v)],
            ScalarExpr::Monomial(m) => vec![m.clone()],
            ScalarExpr::Polynomial(p) => p.monomials().to_vec(),
        }
    }

    /// The expression as a single monomial; `None` for polynomials.
    pub(crate) fn as_monomial(&self) -> Option<Monomial> {
        match self {
            ScalarExpr::Constant(k) => Some(Monomial::from(*k)),
            ScalarExpr::Variable(v) => Some(Monomial::from(*v)),
            ScalarExpr::Monomial(m) => Some(m.clone()),
            ScalarExpr::Polynomial(_) => None,
        }
    }

    /// Like [`ScalarExpr::as_monomial`], also accepting a one-term polynomial.
    pub(crate) fn as_single_monomial(&self) -> Option<Monomial> {
        match self {
            ScalarExpr::Polynomial(p) => match p.monomials() {
                [m] => Some(m.clone()),
                _ => None,
            },
            other => other.as_monomial(),
        }
    }

    pub fn to_polynomial(&self) -> Polynomial {
        match self {
            ScalarExpr::Polynomial(p) => p.clone(),
            other => Polynomial::new(other.to_monomials()),
        }
    }

    pub fn into_polynomial(self) -> Polynomial {
        match self {
            ScalarExpr::Polynomial(p) => p,
            other => Polynomial::new(other.to_monomials()),
        }
    }

    /// Distinct variables in first-seen order.
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            ScalarExpr::Constant(_) => Vec::new(),
            ScalarExpr::Variable(v) => vec![*v],
            ScalarExpr::Monomial(m) => m.variables(),
            ScalarExpr::Polynomial(p) => p.variables(),
        }
    }

    pub fn degree(&self) -> u32 {
        match self {
            ScalarExpr::Constant(_) => 0,
            ScalarExpr::Variable(_) => 1,
            ScalarExpr::Monomial(m) => m.degree(),
            ScalarExpr::Polynomial(p) => p.degree(),
        }
    }

    pub fn is_linear(&self) -> bool {
        self.degree() <= 1
    }

    /// Constant term.
    pub fn constant(&self) -> f64 {
        match self {
            ScalarExpr::Constant(k) => k.0,
            ScalarExpr::Variable(_) => 0.0,
            ScalarExpr::Monomial(m) if m.degree() == 0 => m.coefficient(),
            ScalarExpr::Monomial(_) => 0.0,
            ScalarExpr::Polynomial(p) => p.constant(),
        }
    }

    /// Lift into `kind` without changing the value. Kinds that cannot hold
    /// the value (e.g. a constant as a variable) leave it untouched.
    pub(crate) fn promote(self, kind: ScalarKind) -> ScalarExpr {
        match (kind, self) {
            (ScalarKind::Polynomial, expr) => ScalarExpr::Polynomial(expr.into_polynomial()),
            (ScalarKind::Monomial, ScalarExpr::Constant(k)) => {
                ScalarExpr::Monomial(Monomial::from(k))
            }
            (ScalarKind::Monomial, ScalarExpr::Variable(v)) => {
                ScalarExpr::Monomial(Monomial::from(v))
            }
            (_, expr) => expr,
        }
    }

    /// Convert into a concrete element type, promoting first.
    pub(crate) fn into_element<T: Element>(self) -> Result<T, ExprError> {
        let promoted = self.promote(T::KIND);
        let kind = promoted.kind();
        T::from_scalar(promoted).ok_or(ExprError::UnsupportedInput {
            function: "promote",
            input: kind.as_str().to_string(),
        })
    }
}

impl From<Constant> for ScalarExpr {
    fn from(value: Constant) -> Self {
        ScalarExpr::Constant(value)
    }
}

impl From<f64> for ScalarExpr {
    fn from(value: f64) -> Self {
        ScalarExpr::Constant(Constant(value))
    }
}

impl From<Variable> for ScalarExpr {
    fn from(value: Variable) -> Self {
        ScalarExpr::Variable(value)
    }
}

impl From<Monomial> for ScalarExpr {
    fn from(value: Monomial) -> Self {
        ScalarExpr::Monomial(value)
    }
}

impl From<Polynomial> for ScalarExpr {
    fn from(value: Polynomial) -> Self {
        ScalarExpr::Polynomial(value)
    }
}

impl std::fmt::Display for ScalarExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarExpr::Constant(k) => write!(f, "{k}"),
            ScalarExpr::Variable(v) => write!(f, "{v}"),
            ScalarExpr::Monomial(m) => write!(f, "{m}"),
            ScalarExpr::Polynomial(p) => write!(f, "{p}"),
        }
    }
}

/// Scalar types that can be stored in a [`Vector`](crate::Vector) or
/// [`Matrix`](crate::Matrix).
pub trait Element: Clone + std::fmt::Display + Into<ScalarExpr> {
    const KIND: ScalarKind;

    fn check(&self) -> Result<(), ExprError>;

    /// Recover the concrete type from a scalar of the same kind.
    fn from_scalar(expr: ScalarExpr) -> Option<Self>;

    /// Same value with like terms combined; never fails on valid input.
    fn simplified(&self) -> Self;

    fn to_scalar(&self) -> ScalarExpr {
        self.clone().into()
    }
}

impl Element for Constant {
    const KIND: ScalarKind = ScalarKind::Constant;

    fn check(&self) -> Result<(), ExprError> {
        Constant::check(self)
    }

    fn from_scalar(expr: ScalarExpr) -> Option<Self> {
        match expr {
            ScalarExpr::Constant(k) => Some(k),
            _ => None,
        }
    }

    fn simplified(&self) -> Self {
        *self
    }
}

impl Element for Variable {
    const KIND: ScalarKind = ScalarKind::Variable;

    fn check(&self) -> Result<(), ExprError> {
        Variable::check(self)
    }

    fn from_scalar(expr: ScalarExpr) -> Option<Self> {
        match expr {
            ScalarExpr::Variable(v) => Some(v),
            _ => None,
        }
    }

    fn simplified(&self) -> Self {
        *self
    }
}

impl Element for Monomial {
    const KIND: ScalarKind = ScalarKind::Monomial;

    fn check(&self) -> Result<(), ExprError> {
        Monomial::check(self)
    }

    fn from_scalar(expr: ScalarExpr) -> Option<Self> {
        match expr {
            ScalarExpr::Monomial(m) => Some(m),
            _ => None,
        }
    }

    fn simplified(&self) -> Self {
        self.normalized()
    }
}

impl Element for Polynomial {
    const KIND: ScalarKind = ScalarKind::Polynomial;

    fn check(&self) -> Result<(), ExprError> {
        Polynomial::check(self)
    }

    fn from_scalar(expr: ScalarExpr) -> Option<Self> {
        match expr {
            ScalarExpr::Polynomial(p) => Some(p),
            _ => None,
        }
    }

    fn simplified(&self) -> Self {
        Polynomial::simplified(self)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::env::Environment;

    #[test]
    fn join_meets_constant_and_variable_at_monomial() {
        use ScalarKind as K;
        assert_eq!(K::Constant.join(K::Constant), K::Constant);
        assert_eq!(K::Variable.join(K::Variable), K::Variable);
        assert_eq!(K::Constant.join(K::Variable), K::Monomial);
        assert_eq!(K::Variable.join(K::Constant), K::Monomial);
        assert_eq!(K::Variable.join(K::Monomial), K::Monomial);
        assert_eq!(K::Monomial.join(K::Polynomial), K::Polynomial);
        assert_eq!(K::Constant.join(K::Polynomial), K::Polynomial);
    }

    #[test]
    fn promote_preserves_value() {
        let env = Environment::new("scalar");
        let x = env.new_variable();
        let promoted = ScalarExpr::from(x).promote(ScalarKind::Monomial);
        assert_eq!(promoted, ScalarExpr::Monomial(Monomial::term(x, 1.0)));

        let promoted = ScalarExpr::from(2.0).promote(ScalarKind::Polynomial);
        assert_eq!(promoted.kind(), ScalarKind::Polynomial);
        assert_eq!(promoted.constant(), 2.0);
    }

    #[test]
    fn into_element_rejects_impossible_demotion() {
        let err = ScalarExpr::from(1.0).into_element::<Variable>().unwrap_err();
        assert_eq!(err.code(), "INPUT_UNSUPPORTED");
    }

    #[test]
    fn constant_term_by_kind() {
        let env = Environment::new("scalar");
        let x = env.new_variable();
        assert_eq!(ScalarExpr::from(x).constant(), 0.0);
        assert_eq!(ScalarExpr::from(Monomial::constant(2.5)).constant(), 2.5);
        assert_eq!(ScalarExpr::from(Monomial::term(x, 2.5)).constant(), 0.0);
    }
}
