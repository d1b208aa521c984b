//! Implication between single-variable linear constraints.

use crate::constraint::{ComparisonSense, ScalarConstraint};
use crate::error::{ExprError, Side};
use crate::expr::variable::Variable;

/// `x <sense> bound` form of a single-variable linear constraint.
#[derive(Debug, Clone, Copy)]
struct Bound {
    variable: Variable,
    sense: ComparisonSense,
    value: f64,
}

fn bound_of(constraint: &ScalarConstraint, side: Side) -> Result<Bound, ExprError> {
    constraint
        .check()
        .map_err(|source| ExprError::operand("implies", side, source))?;
    let (left, rhs) = constraint.split();
    let variables = left.variables();
    if variables.len() != 1 {
        return Err(ExprError::ImplicationRequiresSingleVariable {
            variables: variables.len(),
        });
    }
    if !left.is_linear() {
        return Err(ExprError::LinearExpressionRequired {
            side: Some(side),
            expression: constraint.to_string(),
        });
    }

    let variable = variables[0];
    let coefficient: f64 = left
        .monomials()
        .iter()
        .filter(|m| m.linear_variable() == Some(variable))
        .map(|m| m.coefficient())
        .sum();
    let sense = if coefficient < 0.0 {
        constraint.sense().flipped()
    } else {
        constraint.sense()
    };
    Ok(Bound {
        variable,
        sense,
        value: rhs / coefficient,
    })
}

impl ScalarConstraint {
    /// Whether every point satisfying `self` also satisfies `other`.
    ///
    /// Both constraints must be linear in the same single variable.
    pub fn implies(&self, other: &ScalarConstraint) -> Result<bool, ExprError> {
        let premise = bound_of(self, Side::Left)?;
        let conclusion = bound_of(other, Side::Right)?;
        if premise.variable != conclusion.variable {
            return Err(ExprError::ImplicationVariableMismatch {
                left: premise.variable.id(),
                right: conclusion.variable.id(),
            });
        }

        let (b1, b2) = (premise.value, conclusion.value);
        let implied = match (premise.sense, conclusion.sense) {
            (ComparisonSense::LessEqual, ComparisonSense::LessEqual) => b1 <= b2,
            (ComparisonSense::GreaterEqual, ComparisonSense::GreaterEqual) => b1 >= b2,
            (ComparisonSense::Equal, sense) => sense.holds(b1, b2),
            _ => false,
        };
        tracing::trace!(
            component = "linear",
            operation = "implies",
            status = "success",
            premise = premise.sense.as_str(),
            conclusion = conclusion.sense.as_str(),
            implied,
            "Compared single-variable bounds"
        );
        Ok(implied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::env::Environment;
    use crate::expr::expression::Expression;
    use crate::ops::ExprOps;

    fn scalar(c: Result<Constraint, ExprError>) -> ScalarConstraint {
        ScalarConstraint::try_from(c.unwrap()).unwrap()
    }

    fn scaled(x: Variable, by: f64) -> Expression {
        x.multiply(by).unwrap()
    }

    #[test]
    fn negative_coefficient_flips_sense() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        let a = scalar(scaled(x, -2.0).less_eq(4.0));
        let b = scalar(scaled(x, -2.0).less_eq(5.0));
        assert_eq!(a.implies(&b), Ok(true));
        assert_eq!(b.implies(&a), Ok(false));
    }

    #[test]
    fn tighter_upper_bound_implies_looser() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        let a = scalar(scaled(x, 2.0).less_eq(1.0));
        let b = scalar(scaled(x, 10.0).less_eq(2.0));
        assert_eq!(a.implies(&b), Ok(false));
        assert_eq!(b.implies(&a), Ok(true));
    }

    #[test]
    fn tighter_lower_bound_implies_looser() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        let a = scalar(x.greater_eq(3.0));
        let b = scalar(x.greater_eq(1.0));
        assert_eq!(a.implies(&b), Ok(true));
        assert_eq!(b.implies(&a), Ok(false));
    }

    #[test]
    fn negative_coefficient_lower_bound_is_an_upper_bound() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        // -x >= -2  is  x <= 2
        let a = scalar(scaled(x, -1.0).greater_eq(-2.0));
        assert_eq!(a.implies(&scalar(x.less_eq(5.0))), Ok(true));
        assert_eq!(a.implies(&scalar(x.less_eq(1.0))), Ok(false));
        assert_eq!(a.implies(&scalar(x.greater_eq(0.0))), Ok(false));
    }

    #[test]
    fn equality_premise() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        let eq = scalar(x.equals(3.0));
        assert_eq!(eq.implies(&scalar(x.less_eq(3.0))), Ok(true));
        assert_eq!(eq.implies(&scalar(x.greater_eq(4.0))), Ok(false));
        assert_eq!(eq.implies(&scalar(scaled(x, 2.0).equals(6.0))), Ok(true));
        assert_eq!(eq.implies(&scalar(x.equals(2.0))), Ok(false));
    }

    #[test]
    fn inequality_never_implies_equality_or_opposite() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        let le = scalar(x.less_eq(1.0));
        assert_eq!(le.implies(&scalar(x.equals(1.0))), Ok(false));
        assert_eq!(le.implies(&scalar(x.greater_eq(-10.0))), Ok(false));
    }

    #[test]
    fn constants_on_both_sides_are_collected() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        // x + 1 <= 3  is  x <= 2
        let a = scalar(x.plus(1.0).unwrap().less_eq(3.0));
        let b = scalar(x.less_eq(2.0));
        assert_eq!(a.implies(&b), Ok(true));
    }

    #[test]
    fn requires_single_shared_variable() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        let y = env.new_variable();
        let two = scalar(x.plus(y).unwrap().less_eq(1.0));
        let on_x = scalar(x.less_eq(1.0));
        let on_y = scalar(y.less_eq(1.0));
        assert_eq!(
            two.implies(&on_x),
            Err(ExprError::ImplicationRequiresSingleVariable { variables: 2 })
        );
        assert_eq!(
            on_x.implies(&on_y),
            Err(ExprError::ImplicationVariableMismatch {
                left: x.id(),
                right: y.id()
            })
        );
    }

    #[test]
    fn cancelled_variable_leaves_no_variable() {
        let env = Environment::new("implies");
        let x = env.new_variable();
        let empty = scalar(x.minus(x).unwrap().less_eq(1.0));
        let on_x = scalar(x.less_eq(1.0));
        assert_eq!(
            empty.implies(&on_x),
            Err(ExprError::ImplicationRequiresSingleVariable { variables: 0 })
        );
    }
}
