//! Monomials: a coefficient times a product of variable powers.

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::expr::constant::Constant;
use crate::expr::variable::{Variable, unique_variables};
use crate::ids::VariableId;

/// `coefficient * x_a^e_a * x_b^e_b * ...`
///
/// Factors and exponents are parallel sequences. A monomial with no factors
/// is a constant. Construction does not validate; call [`Monomial::check`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monomial {
    coefficient: f64,
    variables: Vec<Variable>,
    exponents: Vec<u32>,
}

impl Monomial {
    pub fn new(coefficient: f64, variables: Vec<Variable>, exponents: Vec<u32>) -> Self {
        Self {
            coefficient,
            variables,
            exponents,
        }
    }

    /// Degree-zero monomial.
    pub fn constant(value: f64) -> Self {
        Self {
            coefficient: value,
            variables: Vec::new(),
            exponents: Vec::new(),
        }
    }

    /// `coefficient * var`.
    pub fn term(var: Variable, coefficient: f64) -> Self {
        Self {
            coefficient,
            variables: vec![var],
            exponents: vec![1],
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Variable factors exactly as stored, duplicates included.
    pub fn variable_factors(&self) -> &[Variable] {
        &self.variables
    }

    pub fn exponents(&self) -> &[u32] {
        &self.exponents
    }

    /// Validate factor/exponent lengths and every factor.
    pub fn check(&self) -> Result<(), ExprError> {
        if self.exponents.len() != self.variables.len() {
            return Err(ExprError::DegreeMismatch {
                degrees: self.exponents.len(),
                variables: self.variables.len(),
            });
        }
        self.variables.iter().try_for_each(Variable::check)
    }

    /// Sum of exponents.
    pub fn degree(&self) -> u32 {
        self.exponents.iter().sum()
    }

    /// True iff the monomial has no factors at all.
    pub fn is_constant(&self) -> bool {
        self.variables.is_empty() && self.exponents.is_empty()
    }

    pub fn is_linear(&self) -> bool {
        self.degree() <= 1
    }

    /// Distinct variables in first-seen order.
    pub fn variables(&self) -> Vec<Variable> {
        unique_variables(
            self.variables
                .iter()
                .zip(&self.exponents)
                .filter(|(_, exp)| **exp > 0)
                .map(|(var, _)| *var),
        )
    }

    /// Total exponent of `var` across all of its factors.
    pub fn exponent_of(&self, var: &Variable) -> u32 {
        self.variables
            .iter()
            .zip(&self.exponents)
            .filter(|(v, _)| *v == var)
            .map(|(_, exp)| *exp)
            .sum()
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.exponent_of(var) > 0
    }

    /// Variable/exponent pairs sorted by id, duplicates merged and zero
    /// exponents dropped. Two monomials with equal signatures differ only by
    /// their coefficient.
    pub(crate) fn signature(&self) -> Vec<(VariableId, u32)> {
        let mut merged: std::collections::BTreeMap<VariableId, u32> =
            std::collections::BTreeMap::new();
        for (var, exp) in self.variables.iter().zip(&self.exponents) {
            *merged.entry(var.id()).or_insert(0) += *exp;
        }
        merged.into_iter().filter(|(_, exp)| *exp > 0).collect()
    }

    pub fn matches_signature(&self, other: &Monomial) -> bool {
        self.signature() == other.signature()
    }

    /// Copy with the coefficient multiplied by `by`.
    pub fn scaled(&self, by: f64) -> Self {
        Self {
            coefficient: self.coefficient * by,
            variables: self.variables.clone(),
            exponents: self.exponents.clone(),
        }
    }

    pub(crate) fn with_coefficient(&self, coefficient: f64) -> Self {
        Self {
            coefficient,
            variables: self.variables.clone(),
            exponents: self.exponents.clone(),
        }
    }

    /// Product of two monomials. Factors shared by both sides have their
    /// exponents added; new factors are appended in `other`'s order.
    pub(crate) fn times(&self, other: &Monomial) -> Monomial {
        let mut product = self.clone();
        product.coefficient *= other.coefficient;
        for (var, exp) in other.variables.iter().zip(&other.exponents) {
            match product.variables.iter().position(|v| v == var) {
                Some(idx) => product.exponents[idx] += *exp,
                None => {
                    product.variables.push(*var);
                    product.exponents.push(*exp);
                }
            }
        }
        product
    }

    /// Same value with duplicate factors merged (first-seen order kept) and
    /// zero exponents removed.
    pub(crate) fn normalized(&self) -> Monomial {
        let mut variables: Vec<Variable> = Vec::with_capacity(self.variables.len());
        let mut exponents: Vec<u32> = Vec::with_capacity(self.exponents.len());
        for (var, exp) in self.variables.iter().zip(&self.exponents) {
            match variables.iter().position(|v| v == var) {
                Some(idx) => exponents[idx] += *exp,
                None => {
                    variables.push(*var);
                    exponents.push(*exp);
                }
            }
        }
        let (variables, exponents): (Vec<Variable>, Vec<u32>) = variables
            .into_iter()
            .zip(exponents)
            .filter(|(_, exp)| *exp > 0)
            .unzip();
        Monomial {
            coefficient: self.coefficient,
            variables,
            exponents,
        }
    }

    /// The single variable of a degree-one monomial.
    pub(crate) fn linear_variable(&self) -> Option<Variable> {
        if self.degree() != 1 {
            return None;
        }
        self.variables
            .iter()
            .zip(&self.exponents)
            .find(|(_, exp)| **exp == 1)
            .map(|(var, _)| *var)
    }
}

impl From<Variable> for Monomial {
    fn from(var: Variable) -> Self {
        Monomial::term(var, 1.0)
    }
}

impl From<Constant> for Monomial {
    fn from(value: Constant) -> Self {
        Monomial::constant(value.0)
    }
}

impl std::fmt::Display for Monomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.variables.is_empty() {
            return write!(f, "{}", self.coefficient);
        }
        if self.coefficient == -1.0 {
            f.write_str("-")?;
        } else if self.coefficient != 1.0 {
            write!(f, "{} ", self.coefficient)?;
        }
        for (idx, (var, exp)) in self.variables.iter().zip(&self.exponents).enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            if *exp == 1 {
                write!(f, "{var}")?;
            } else {
                write!(f, "{var}^{exp}")?;
            }
        }
        Ok(())
    }
}
