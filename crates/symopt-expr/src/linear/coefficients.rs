use nalgebra::{DMatrix, DVector};

use crate::error::ExprError;
use crate::expr::expression::Expression;
use crate::expr::monomial::Monomial;
use crate::expr::scalar::ScalarExpr;
use crate::expr::variable::Variable;

/// Explicit ordering, or the expression's own variables when there is one.
pub(crate) fn resolve_ordering(
    wrt: Option<&[Variable]>,
    own: Vec<Variable>,
) -> Result<Vec<Variable>, ExprError> {
    match wrt {
        Some(ordering) => Ok(ordering.to_vec()),
        None if own.is_empty() => Err(ExprError::LinearCoefficientsUnavailable),
        None => Ok(own),
    }
}

/// Coefficient of each ordered variable in a sum of linear monomials.
/// Constant terms are ignored.
pub(crate) fn coefficient_row(
    monomials: &[Monomial],
    ordering: &[Variable],
) -> Result<DVector<f64>, ExprError> {
    let mut row = DVector::zeros(ordering.len());
    for monomial in monomials {
        let Some(var) = monomial.linear_variable() else {
            continue;
        };
        let idx = ordering
            .iter()
            .position(|v| *v == var)
            .ok_or(ExprError::VariableNotInOrdering { variable: var.id() })?;
        row[idx] += monomial.coefficient();
    }
    Ok(row)
}

impl ScalarExpr {
    /// Coefficient vector of a linear expression with respect to `wrt`
    /// (default: the expression's variables in first-seen order).
    pub fn linear_coefficients(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<DVector<f64>, ExprError> {
        self.check()?;
        if !self.is_linear() {
            return Err(ExprError::LinearExpressionRequired {
                side: None,
                expression: self.to_string(),
            });
        }
        let ordering = resolve_ordering(wrt, self.variables())?;
        coefficient_row(&self.to_monomials(), &ordering)
    }
}

impl Expression {
    /// One row of coefficients per element, in row-major element order.
    pub fn linear_coefficients(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<DMatrix<f64>, ExprError> {
        self.check()?;
        if !self.is_linear() {
            return Err(ExprError::LinearExpressionRequired {
                side: None,
                expression: self.to_string(),
            });
        }
        let ordering = resolve_ordering(wrt, self.variables())?;
        let elements = self.to_scalars();
        let mut matrix = DMatrix::zeros(elements.len(), ordering.len());
        for (i, element) in elements.iter().enumerate() {
            let row = coefficient_row(&element.to_monomials(), &ordering)?;
            for (j, coefficient) in row.iter().enumerate() {
                matrix[(i, j)] = *coefficient;
            }
        }
        Ok(matrix)
    }
}
