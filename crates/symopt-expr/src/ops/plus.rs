//! Addition and subtraction.

use crate::error::ExprError;
use crate::expr::constant::Constant;
use crate::expr::expression::Expression;
use crate::expr::scalar::ScalarExpr;
use crate::ops::grid::{Grid, check_operands, combine_elementwise};
use crate::ops::multiply::scalar_multiply;

/// Sum of two scalars.
///
/// Two addends that are single monomials (one-term polynomials included)
/// with the same signature collapse into one monomial; anything
/// else becomes a polynomial listing the left terms, then the right ones.
pub(crate) fn scalar_plus(left: &ScalarExpr, right: &ScalarExpr) -> ScalarExpr {
    if let (ScalarExpr::Constant(a), ScalarExpr::Constant(b)) = (left, right) {
        return ScalarExpr::Constant(Constant(a.0 + b.0));
    }
    match (left.as_single_monomial(), right.as_single_monomial()) {
        (Some(a), Some(b)) if a.matches_signature(&b) => {
            ScalarExpr::Monomial(a.with_coefficient(a.coefficient() + b.coefficient()))
        }
        _ => ScalarExpr::Polynomial(left.to_polynomial().concat(&right.to_monomials())),
    }
}

pub(crate) fn scalar_negate(expr: &ScalarExpr) -> ScalarExpr {
    scalar_multiply(expr, &ScalarExpr::Constant(Constant(-1.0)))
}

/// `left + right`, broadcasting a scalar operand over a container.
pub fn plus(left: &Expression, right: &Expression) -> Result<Expression, ExprError> {
    check_operands("plus", left, right)?;
    combine_elementwise("plus", &Grid::of(left), &Grid::of(right), scalar_plus)
}

/// `left + (-1 * right)`.
pub fn minus(left: &Expression, right: &Expression) -> Result<Expression, ExprError> {
    check_operands("minus", left, right)?;
    let negated = Grid::of(right).map(scalar_negate);
    combine_elementwise("minus", &Grid::of(left), &negated, scalar_plus)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::expr::monomial::Monomial;
    use crate::expr::polynomial::Polynomial;
    use crate::expr::vector::Vector;

    #[test]
    fn constants_stay_constant() {
        let sum = plus(&Expression::from(1.5), &Expression::from(2.0)).unwrap();
        assert_eq!(sum, Expression::Constant(Constant(3.5)));
    }

    #[test]
    fn variable_plus_constant_is_two_term_polynomial() {
        let env = Environment::new("plus");
        let x = env.new_variable();
        let sum = plus(&Expression::from(x), &Expression::from(2.75)).unwrap();
        let Expression::Polynomial(p) = sum else {
            panic!("expected a polynomial");
        };
        assert_eq!(p.len(), 2);
        assert_eq!(p.monomials()[0], Monomial::term(x, 1.0));
        assert_eq!(p.monomials()[1], Monomial::constant(2.75));
    }

    #[test]
    fn like_terms_merge_into_monomial() {
        let env = Environment::new("plus");
        let x = env.new_variable();
        let sum = plus(&Expression::from(x), &Expression::from(Monomial::term(x, 2.0))).unwrap();
        assert_eq!(sum, Expression::Monomial(Monomial::term(x, 3.0)));
    }

    #[test]
    fn one_term_polynomial_merges_with_like_term() {
        let env = Environment::new("plus");
        let x = env.new_variable();
        let p = Polynomial::new(vec![Monomial::term(x, 2.0)]);
        let sum = plus(&Expression::from(p.clone()), &Expression::from(x)).unwrap();
        assert_eq!(sum, Expression::Monomial(Monomial::term(x, 3.0)));
        let sum = plus(&Expression::from(x), &Expression::from(p)).unwrap();
        assert_eq!(sum, Expression::Monomial(Monomial::term(x, 3.0)));
    }

    #[test]
    fn polynomial_sum_is_unmerged_concatenation() {
        let env = Environment::new("plus");
        let x = env.new_variable();
        let p = Polynomial::new(vec![Monomial::term(x, 1.0), Monomial::constant(1.0)]);
        let sum = plus(&Expression::from(p), &Expression::from(x)).unwrap();
        let Expression::Polynomial(p) = sum else {
            panic!("expected a polynomial");
        };
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn minus_negates_right_operand() {
        let env = Environment::new("minus");
        let x = env.new_variable();
        let y = env.new_variable();
        let diff = minus(&Expression::from(x), &Expression::from(y)).unwrap();
        assert_eq!(diff.to_string(), "x_0 + -x_1");
        let zero = minus(&Expression::from(x), &Expression::from(x)).unwrap();
        assert_eq!(zero, Expression::Monomial(Monomial::term(x, 0.0)));
    }

    #[test]
    fn vector_plus_scalar_broadcasts() {
        let env = Environment::new("plus");
        let v = env.new_variable_vector(3);
        let sum = plus(&Expression::from(v), &Expression::from(1.0)).unwrap();
        assert_eq!(sum.type_name(), "PolynomialVector");
        assert_eq!(sum.dims().rows, 3);
    }

    #[test]
    fn vector_lengths_must_match() {
        let env = Environment::new("plus");
        let a = Expression::from(env.new_variable_vector(2));
        let b = Expression::from(env.new_variable_vector(3));
        let err = plus(&a, &b).unwrap_err();
        assert_eq!(err.code(), "VECTOR_SHAPE_MISMATCH");
        assert_eq!(err.shape_mismatch().map(|(op, _, _)| op), Some("plus"));
    }

    #[test]
    fn invalid_operand_is_reported_before_shapes() {
        let env = Environment::new("plus");
        let a = Expression::from(env.new_variable_vector(2));
        let b = Expression::from(Vector::<Constant>::new(Vec::new()));
        let err = minus(&a, &b).unwrap_err();
        assert_eq!(err.code(), "OPERAND_INVALID");
        assert_eq!(err.root_cause(), &ExprError::EmptyVector);
    }
}
