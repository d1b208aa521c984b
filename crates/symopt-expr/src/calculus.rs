//! Symbolic differentiation, substitution, powers and evaluation.

use std::collections::HashMap;

use crate::error::{ExprError, Side};
use crate::expr::constant::Constant;
use crate::expr::expression::Expression;
use crate::expr::monomial::Monomial;
use crate::expr::polynomial::Polynomial;
use crate::expr::scalar::ScalarExpr;
use crate::expr::variable::Variable;
use crate::ops::grid::{Grid, check_operand};
use crate::ops::multiply::scalar_multiply;
use crate::ops::plus::scalar_plus;

impl Monomial {
    /// `d/d var`, or `None` when `var` does not occur.
    fn derivative(&self, var: &Variable) -> Option<Monomial> {
        let exponent = self.exponent_of(var);
        if exponent == 0 {
            return None;
        }
        let normalized = self.normalized();
        let mut variables = Vec::with_capacity(normalized.variable_factors().len());
        let mut exponents = Vec::with_capacity(normalized.exponents().len());
        for (v, e) in normalized.variable_factors().iter().zip(normalized.exponents()) {
            let e = if v == var { e - 1 } else { *e };
            if e > 0 {
                variables.push(*v);
                exponents.push(e);
            }
        }
        Some(Monomial::new(
            self.coefficient() * f64::from(exponent),
            variables,
            exponents,
        ))
    }

    /// Factors other than `var`, keeping the coefficient.
    fn without(&self, var: &Variable) -> Monomial {
        let (variables, exponents): (Vec<Variable>, Vec<u32>) = self
            .variable_factors()
            .iter()
            .zip(self.exponents())
            .filter(|(v, _)| *v != var)
            .map(|(v, e)| (*v, *e))
            .unzip();
        Monomial::new(self.coefficient(), variables, exponents)
    }

    fn evaluate(&self, point: &HashMap<Variable, f64>) -> Result<f64, ExprError> {
        let mut value = self.coefficient();
        for (var, exp) in self.variable_factors().iter().zip(self.exponents()) {
            let x = point
                .get(var)
                .ok_or(ExprError::UnassignedVariable { variable: var.id() })?;
            value *= x.powi(i32::try_from(*exp).unwrap_or(i32::MAX));
        }
        Ok(value)
    }
}

/// `base^exponent` by repeated multiplication; `base^0` is the constant 1.
/// Negative exponents are an error of their own; exponents past `u32::MAX`
/// are not supported.
fn power_exponent(exponent: i64) -> Result<u32, ExprError> {
    if exponent < 0 {
        return Err(ExprError::NegativeExponent { exponent });
    }
    u32::try_from(exponent).map_err(|_| ExprError::UnsupportedInput {
        function: "power",
        input: format!("exponent {exponent}"),
    })
}

pub(crate) fn scalar_power(base: &ScalarExpr, exponent: u32) -> ScalarExpr {
    let mut result = ScalarExpr::Constant(Constant::ONE);
    for _ in 0..exponent {
        result = scalar_multiply(&result, base);
    }
    result
}

fn scalar_derivative(expr: &ScalarExpr, var: &Variable) -> ScalarExpr {
    let zero = ScalarExpr::Constant(Constant::ZERO);
    match expr {
        ScalarExpr::Constant(_) => zero,
        ScalarExpr::Variable(v) if v == var => ScalarExpr::Constant(Constant::ONE),
        ScalarExpr::Variable(_) => zero,
        ScalarExpr::Monomial(m) => m.derivative(var).map(ScalarExpr::Monomial).unwrap_or(zero),
        ScalarExpr::Polynomial(p) => {
            let terms: Vec<Monomial> = p
                .monomials()
                .iter()
                .filter_map(|m| m.derivative(var))
                .collect();
            if terms.is_empty() {
                zero
            } else {
                ScalarExpr::Polynomial(Polynomial::new(terms))
            }
        }
    }
}

fn scalar_substitute(expr: &ScalarExpr, var: &Variable, replacement: &ScalarExpr) -> ScalarExpr {
    match expr {
        ScalarExpr::Constant(_) => expr.clone(),
        ScalarExpr::Variable(v) if v == var => replacement.clone(),
        ScalarExpr::Variable(_) => expr.clone(),
        ScalarExpr::Monomial(_) | ScalarExpr::Polynomial(_) => {
            let mut terms = expr.to_monomials().into_iter().map(|m| {
                if m.contains(var) {
                    let power = scalar_power(replacement, m.exponent_of(var));
                    scalar_multiply(&ScalarExpr::Monomial(m.without(var)), &power)
                } else {
                    ScalarExpr::Monomial(m)
                }
            });
            let first = terms.next().unwrap_or(ScalarExpr::Constant(Constant::ZERO));
            let sum = terms.fold(first, |acc, term| scalar_plus(&acc, &term));
            match expr {
                ScalarExpr::Polynomial(_) => ScalarExpr::Polynomial(sum.into_polynomial().simplified()),
                _ => sum.simplified(),
            }
        }
    }
}

impl ScalarExpr {
    /// Value at `point`; every variable must be assigned.
    pub fn evaluate(&self, point: &HashMap<Variable, f64>) -> Result<f64, ExprError> {
        self.check()?;
        match self {
            ScalarExpr::Constant(k) => Ok(k.0),
            ScalarExpr::Variable(v) => point
                .get(v)
                .copied()
                .ok_or(ExprError::UnassignedVariable { variable: v.id() }),
            ScalarExpr::Monomial(m) => m.evaluate(point),
            ScalarExpr::Polynomial(p) => p
                .monomials()
                .iter()
                .map(|m| m.evaluate(point))
                .sum(),
        }
    }

    pub fn derivative_wrt(&self, var: &Variable) -> Result<ScalarExpr, ExprError> {
        self.check()?;
        var.check()?;
        Ok(scalar_derivative(self, var))
    }

    pub fn power(&self, exponent: i64) -> Result<ScalarExpr, ExprError> {
        self.check()?;
        Ok(scalar_power(self, power_exponent(exponent)?))
    }
}

impl Expression {
    /// Elementwise derivative with respect to `var`.
    pub fn derivative_wrt(&self, var: &Variable) -> Result<Expression, ExprError> {
        check_operand("derivative", Side::Left, self)?;
        check_operand("derivative", Side::Right, &Expression::Variable(*var))?;
        Grid::of(self)
            .map(|e| scalar_derivative(e, var))
            .into_expression()
    }

    /// Replace `var` by `replacement` everywhere, expanding and simplifying
    /// the affected elements. The replacement must be a scalar.
    pub fn substitute(
        &self,
        var: &Variable,
        replacement: impl Into<Expression>,
    ) -> Result<Expression, ExprError> {
        let replacement = replacement.into();
        check_operand("substitute", Side::Left, self)?;
        check_operand("substitute", Side::Right, &Expression::Variable(*var))?;
        check_operand("substitute", Side::Right, &replacement)?;
        let replacement = replacement.to_scalar().ok_or(ExprError::UnsupportedInput {
            function: "substitute",
            input: replacement.type_name().to_string(),
        })?;
        Grid::of(self)
            .map(|e| scalar_substitute(e, var, &replacement))
            .into_expression()
    }

    /// Apply each `(variable, replacement)` pair in order.
    pub fn substitute_according_to(
        &self,
        substitutions: &[(Variable, ScalarExpr)],
    ) -> Result<Expression, ExprError> {
        substitutions
            .iter()
            .try_fold(self.clone(), |expr, (var, replacement)| {
                expr.substitute(var, replacement.clone())
            })
    }

    /// `self^exponent` for scalar expressions.
    pub fn power(&self, exponent: i64) -> Result<Expression, ExprError> {
        check_operand("power", Side::Left, self)?;
        let scalar = self.to_scalar().ok_or(ExprError::UnsupportedInput {
            function: "power",
            input: self.type_name().to_string(),
        })?;
        Ok(Expression::from(scalar_power(&scalar, power_exponent(exponent)?)))
    }

    /// Value of every element at `point`, as a constant of the same form.
    pub fn evaluate(&self, point: &HashMap<Variable, f64>) -> Result<Expression, ExprError> {
        self.check()?;
        let grid = Grid::of(self);
        let values = grid
            .elements
            .iter()
            .map(|e| e.evaluate(point).map(ScalarExpr::from))
            .collect::<Result<Vec<_>, _>>()?;
        Grid::new(grid.form, grid.shape, values).into_expression()
    }
}
