//! Polynomials: sums of monomials.

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::expr::constant::Constant;
use crate::expr::monomial::Monomial;
use crate::expr::variable::{Variable, unique_variables};

/// Sum of monomials in insertion order.
///
/// Terms are not merged on construction or addition; use
/// [`Polynomial::simplify`] to combine monomials with the same signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    monomials: Vec<Monomial>,
}

impl Polynomial {
    pub fn new(monomials: Vec<Monomial>) -> Self {
        Self { monomials }
    }

    pub fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }

    pub fn into_monomials(self) -> Vec<Monomial> {
        self.monomials
    }

    /// Number of monomials.
    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monomials.is_empty()
    }

    /// Non-empty and every monomial valid.
    pub fn check(&self) -> Result<(), ExprError> {
        if self.monomials.is_empty() {
            return Err(ExprError::EmptyPolynomial);
        }
        self.monomials.iter().try_for_each(Monomial::check)
    }

    /// Highest monomial degree.
    pub fn degree(&self) -> u32 {
        self.monomials.iter().map(Monomial::degree).max().unwrap_or(0)
    }

    /// Sum of the coefficients of all degree-zero monomials.
    pub fn constant(&self) -> f64 {
        self.monomials
            .iter()
            .filter(|m| m.degree() == 0)
            .map(Monomial::coefficient)
            .sum()
    }

    /// Distinct variables in first-seen order.
    pub fn variables(&self) -> Vec<Variable> {
        unique_variables(self.monomials.iter().flat_map(Monomial::variables))
    }

    pub fn is_linear(&self) -> bool {
        self.monomials.iter().all(Monomial::is_linear)
    }

    /// Monomials of positive degree, or a single zero constant if none remain.
    pub(crate) fn without_constant(&self) -> Polynomial {
        let terms: Vec<Monomial> = self
            .monomials
            .iter()
            .filter(|m| m.degree() > 0)
            .cloned()
            .collect();
        if terms.is_empty() {
            Polynomial::from(Constant::ZERO)
        } else {
            Polynomial::new(terms)
        }
    }

    /// Concatenation of both monomial lists, `self` first.
    pub(crate) fn concat(&self, other: &[Monomial]) -> Polynomial {
        let mut monomials = Vec::with_capacity(self.monomials.len() + other.len());
        monomials.extend_from_slice(&self.monomials);
        monomials.extend_from_slice(other);
        Polynomial { monomials }
    }

    /// Cartesian product with `other`, `self`'s monomials varying slowest.
    pub(crate) fn distribute(&self, other: &[Monomial]) -> Polynomial {
        distribute(&self.monomials, other)
    }
}

pub(crate) fn distribute(left: &[Monomial], right: &[Monomial]) -> Polynomial {
    let mut monomials = Vec::with_capacity(left.len() * right.len());
    for l in left {
        for r in right {
            monomials.push(l.times(r));
        }
    }
    Polynomial { monomials }
}

impl From<Monomial> for Polynomial {
    fn from(monomial: Monomial) -> Self {
        Self {
            monomials: vec![monomial],
        }
    }
}

impl From<Variable> for Polynomial {
    fn from(var: Variable) -> Self {
        Polynomial::from(Monomial::from(var))
    }
}

impl From<Constant> for Polynomial {
    fn from(value: Constant) -> Self {
        Polynomial::from(Monomial::from(value))
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, monomial) in self.monomials.iter().enumerate() {
            if idx > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{monomial}")?;
        }
        Ok(())
    }
}
