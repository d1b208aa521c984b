//! Combining like terms.
//!
//! Monomials are grouped by signature (factors merged per variable, zero
//! exponents dropped) in first-seen order and their coefficients summed.
//! Zero terms are removed unless nothing else would remain, in which case a
//! single zero constant is kept so the polynomial stays valid.

use std::collections::HashMap;

use crate::error::ExprError;
use crate::expr::expression::Expression;
use crate::expr::matrix::Matrix;
use crate::expr::monomial::Monomial;
use crate::expr::polynomial::Polynomial;
use crate::expr::scalar::{Element, ScalarExpr};
use crate::expr::vector::Vector;

impl Polynomial {
    /// Like terms combined. Assumes a valid polynomial.
    pub(crate) fn simplified(&self) -> Polynomial {
        let mut slots: HashMap<_, usize> = HashMap::new();
        let mut groups: Vec<Monomial> = Vec::new();
        for monomial in self.monomials() {
            match slots.get(&monomial.signature()) {
                Some(&idx) => {
                    let merged = groups[idx].coefficient() + monomial.coefficient();
                    groups[idx] = groups[idx].with_coefficient(merged);
                }
                None => {
                    slots.insert(monomial.signature(), groups.len());
                    groups.push(monomial.normalized());
                }
            }
        }

        let kept: Vec<Monomial> = groups
            .into_iter()
            .filter(|m| m.coefficient() != 0.0)
            .collect();
        if kept.is_empty() {
            Polynomial::from(Monomial::constant(0.0))
        } else {
            Polynomial::new(kept)
        }
    }

    pub fn simplify(&self) -> Result<Polynomial, ExprError> {
        self.check()?;
        let simplified = self.simplified();
        tracing::trace!(
            component = "simplify",
            operation = "polynomial",
            status = "success",
            terms_before = self.len(),
            terms_after = simplified.len(),
            "Combined like terms"
        );
        Ok(simplified)
    }
}

impl Monomial {
    /// Duplicate factors merged and zero exponents dropped.
    pub fn simplify(&self) -> Result<Monomial, ExprError> {
        self.check()?;
        Ok(self.normalized())
    }
}

impl ScalarExpr {
    pub(crate) fn simplified(&self) -> ScalarExpr {
        match self {
            ScalarExpr::Constant(_) | ScalarExpr::Variable(_) => self.clone(),
            ScalarExpr::Monomial(m) => ScalarExpr::Monomial(m.normalized()),
            ScalarExpr::Polynomial(p) => ScalarExpr::Polynomial(p.simplified()),
        }
    }

    pub fn simplify(&self) -> Result<ScalarExpr, ExprError> {
        self.check()?;
        Ok(self.simplified())
    }
}

impl<T: Element> Vector<T> {
    /// Every element simplified; length unchanged.
    pub fn simplify(&self) -> Result<Vector<T>, ExprError> {
        self.check()?;
        Ok(self.iter().map(Element::simplified).collect())
    }
}

impl<T: Element> Matrix<T> {
    /// Every entry simplified; shape unchanged.
    pub fn simplify(&self) -> Result<Matrix<T>, ExprError> {
        self.check()?;
        let data = self.elements().iter().map(Element::simplified).collect();
        Ok(Matrix::from_parts(self.shape(), data))
    }
}

impl Expression {
    pub fn simplify(&self) -> Result<Expression, ExprError> {
        Ok(match self {
            Expression::Constant(k) => Expression::Constant(*k),
            Expression::Variable(v) => {
                v.check()?;
                Expression::Variable(*v)
            }
            Expression::Monomial(m) => Expression::Monomial(m.simplify()?),
            Expression::Polynomial(p) => Expression::Polynomial(p.simplify()?),
            Expression::ConstantVector(c) => Expression::ConstantVector(c.simplify()?),
            Expression::VariableVector(c) => Expression::VariableVector(c.simplify()?),
            Expression::MonomialVector(c) => Expression::MonomialVector(c.simplify()?),
            Expression::PolynomialVector(c) => Expression::PolynomialVector(c.simplify()?),
            Expression::ConstantMatrix(c) => Expression::ConstantMatrix(c.simplify()?),
            Expression::VariableMatrix(c) => Expression::VariableMatrix(c.simplify()?),
            Expression::MonomialMatrix(c) => Expression::MonomialMatrix(c.simplify()?),
            Expression::PolynomialMatrix(c) => Expression::PolynomialMatrix(c.simplify()?),
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::env::Environment;

    #[test]
    fn like_terms_are_summed_in_first_seen_order() {
        let env = Environment::new("simplify");
        let x = env.new_variable();
        let y = env.new_variable();
        let p = Polynomial::new(vec![
            Monomial::term(y, 1.0),
            Monomial::constant(2.0),
            Monomial::term(x, 1.5),
            Monomial::term(y, 2.0),
            Monomial::constant(-1.0),
        ]);
        let s = p.simplify().unwrap();
        assert_eq!(s.to_string(), "3 x_1 + 1 + 1.5 x_0");
    }

    #[test]
    fn factor_order_does_not_matter() {
        let env = Environment::new("simplify");
        let x = env.new_variable();
        let y = env.new_variable();
        let p = Polynomial::new(vec![
            Monomial::new(1.0, vec![x, y], vec![1, 1]),
            Monomial::new(2.0, vec![y, x], vec![1, 1]),
        ]);
        let s = p.simplify().unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.monomials()[0].coefficient(), 3.0);
    }

    #[test]
    fn cancelled_terms_keep_zero_constant() {
        let env = Environment::new("simplify");
        let x = env.new_variable();
        let p = Polynomial::new(vec![Monomial::term(x, 1.0), Monomial::term(x, -1.0)]);
        let s = p.simplify().unwrap();
        assert_eq!(s, Polynomial::from(Monomial::constant(0.0)));
        assert!(s.check().is_ok());
    }

    #[test]
    fn zero_terms_dropped_when_others_remain() {
        let env = Environment::new("simplify");
        let x = env.new_variable();
        let p = Polynomial::new(vec![Monomial::constant(0.0), Monomial::term(x, 2.0)]);
        assert_eq!(p.simplify().unwrap().to_string(), "2 x_0");
    }

    #[test]
    fn simplify_is_idempotent() {
        let env = Environment::new("simplify");
        let x = env.new_variable();
        let y = env.new_variable();
        let p = Polynomial::new(vec![
            Monomial::new(1.0, vec![x, x], vec![1, 1]),
            Monomial::term(y, 0.0),
            Monomial::new(4.0, vec![x], vec![2]),
        ]);
        let once = p.simplify().unwrap();
        assert_eq!(once.simplify().unwrap(), once);
    }

    #[test]
    fn invalid_polynomial_is_rejected() {
        assert_eq!(
            Polynomial::new(Vec::new()).simplify(),
            Err(ExprError::EmptyPolynomial)
        );
    }

    #[test]
    fn containers_keep_shape() {
        let env = Environment::new("simplify");
        let x = env.new_variable();
        let doubled = Polynomial::new(vec![Monomial::term(x, 1.0), Monomial::term(x, 1.0)]);
        let m = Matrix::from_rows(vec![
            vec![doubled.clone(), Polynomial::from(x)],
            vec![Polynomial::from(x), doubled],
        ])
        .unwrap();
        let s = Expression::from(m).simplify().unwrap();
        assert_eq!(s.to_string(), "[[2 x_0, x_0], [x_0, 2 x_0]]");
    }
}
