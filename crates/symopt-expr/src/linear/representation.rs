//! Linear forms and systems extracted from constraints.

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::constraint::{
    ComparisonSense, Constraint, MatrixConstraint, ScalarConstraint, VectorConstraint,
};
use crate::error::{ExprError, Side};
use crate::expr::constant::Constant;
use crate::expr::expression::Expression;
use crate::expr::matrix::Matrix;
use crate::expr::polynomial::Polynomial;
use crate::expr::vector::Vector;
use crate::expr::variable::Variable;
use crate::linear::coefficients::coefficient_row;
use crate::shape::Shape;

/// `coefficients · x <sense> constant` over `variables`.
///
/// The sense is never `GreaterEqual`: such constraints are stored negated as
/// `LessEqual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearForm {
    coefficients: DVector<f64>,
    constant: f64,
    variables: Vec<Variable>,
    sense: ComparisonSense,
}

impl LinearForm {
    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn is_satisfied(&self, point: &HashMap<Variable, f64>) -> Result<bool, ExprError> {
        let x = point_vector(&self.variables, point)?;
        Ok(self.sense.holds(self.coefficients.dot(&x), self.constant))
    }
}

/// `coefficients · x <sense> constants`, one row per element constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSystem {
    coefficients: DMatrix<f64>,
    constants: DVector<f64>,
    variables: Vec<Variable>,
    sense: ComparisonSense,
}

impl LinearSystem {
    pub fn coefficients(&self) -> &DMatrix<f64> {
        &self.coefficients
    }

    pub fn constants(&self) -> &DVector<f64> {
        &self.constants
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn num_rows(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Whether every row holds at `point`.
    pub fn is_satisfied(&self, point: &HashMap<Variable, f64>) -> Result<bool, ExprError> {
        let x = point_vector(&self.variables, point)?;
        let lhs = &self.coefficients * x;
        Ok(lhs
            .iter()
            .zip(self.constants.iter())
            .all(|(l, r)| self.sense.holds(*l, *r)))
    }
}

fn point_vector(
    variables: &[Variable],
    point: &HashMap<Variable, f64>,
) -> Result<DVector<f64>, ExprError> {
    let values = variables
        .iter()
        .map(|v| {
            point
                .get(v)
                .copied()
                .ok_or(ExprError::UnassignedVariable { variable: v.id() })
        })
        .collect::<Result<Vec<f64>, _>>()?;
    Ok(DVector::from_vec(values))
}

fn require_sense(sense: ComparisonSense, equality: bool) -> Result<(), ExprError> {
    match (equality, sense.is_inequality()) {
        (true, true) => Err(ExprError::EqualityRequired { sense }),
        (false, false) => Err(ExprError::InequalityRequired { sense }),
        _ => Ok(()),
    }
}

fn require_linear(expr: &Expression, side: Side) -> Result<(), ExprError> {
    if expr.is_linear() {
        return Ok(());
    }
    Err(ExprError::LinearExpressionRequired {
        side: Some(side),
        expression: expr.to_string(),
    })
}

impl ScalarConstraint {
    /// Variable terms on the left, simplified; constants summed on the right.
    pub(crate) fn split(&self) -> (Polynomial, f64) {
        let mut terms = self.left().to_monomials();
        terms.extend(self.right().to_monomials().iter().map(|m| m.scaled(-1.0)));
        let difference = Polynomial::new(terms).simplified();
        (difference.without_constant(), -difference.constant())
    }

    /// Same constraint as `polynomial <sense> constant`.
    pub fn simplified(&self) -> Result<ScalarConstraint, ExprError> {
        self.check()?;
        let (left, right) = self.split();
        Ok(ScalarConstraint::new(left, Constant(right), self.sense()))
    }

    /// `(a, b)` with the constraint equivalent to `a · x <= b`
    /// (`a · x >= b` constraints are negated).
    pub fn linear_inequality_representation(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<LinearForm, ExprError> {
        self.check()?;
        require_sense(self.sense(), false)?;
        self.linear_form(wrt)
    }

    /// `(a, b)` with the constraint equivalent to `a · x = b`.
    pub fn linear_equality_representation(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<LinearForm, ExprError> {
        self.check()?;
        require_sense(self.sense(), true)?;
        self.linear_form(wrt)
    }

    fn linear_form(&self, wrt: Option<&[Variable]>) -> Result<LinearForm, ExprError> {
        require_linear(&Expression::from(self.left().clone()), Side::Left)?;
        require_linear(&Expression::from(self.right().clone()), Side::Right)?;
        let variables = wrt.map_or_else(|| self.variables(), <[Variable]>::to_vec);
        let (left, constant) = self.split();
        let coefficients = coefficient_row(left.monomials(), &variables)?;

        let form = match self.sense() {
            ComparisonSense::GreaterEqual => LinearForm {
                coefficients: -coefficients,
                constant: -constant,
                variables,
                sense: ComparisonSense::LessEqual,
            },
            sense => LinearForm {
                coefficients,
                constant,
                variables,
                sense,
            },
        };
        tracing::debug!(
            component = "linear",
            operation = "representation",
            status = "success",
            sense = form.sense.as_str(),
            num_variables = form.variables.len(),
            "Extracted linear form"
        );
        Ok(form)
    }
}

/// Shared extraction for vector and matrix constraints.
fn linear_system(
    left: &Expression,
    right: &Expression,
    sense: ComparisonSense,
    constraints: &[ScalarConstraint],
    variables: Vec<Variable>,
) -> Result<LinearSystem, ExprError> {
    require_linear(left, Side::Left)?;
    require_linear(right, Side::Right)?;

    let negate = sense == ComparisonSense::GreaterEqual;
    let sign: f64 = if negate { -1.0 } else { 1.0 };
    let mut coefficients = DMatrix::zeros(constraints.len(), variables.len());
    let mut constants = DVector::zeros(constraints.len());
    for (i, constraint) in constraints.iter().enumerate() {
        let (poly, constant) = constraint.split();
        let row = coefficient_row(poly.monomials(), &variables)?;
        for (j, coefficient) in row.iter().enumerate() {
            coefficients[(i, j)] = sign * coefficient;
        }
        constants[i] = sign * constant;
    }

    let sense = if negate {
        ComparisonSense::LessEqual
    } else {
        sense
    };
    tracing::debug!(
        component = "linear",
        operation = "representation",
        status = "success",
        sense = sense.as_str(),
        num_rows = constraints.len(),
        num_variables = variables.len(),
        "Extracted linear system"
    );
    Ok(LinearSystem {
        coefficients,
        constants,
        variables,
        sense,
    })
}

fn split_all(constraints: &[ScalarConstraint]) -> (Vec<Polynomial>, Vec<Constant>) {
    constraints
        .iter()
        .map(|c| {
            let (left, right) = c.split();
            (left, Constant(right))
        })
        .unzip()
}

impl VectorConstraint {
    /// Elementwise [`ScalarConstraint::simplified`].
    pub fn simplified(&self) -> Result<VectorConstraint, ExprError> {
        self.check()?;
        let (left, right) = split_all(&self.constraints());
        Ok(VectorConstraint::from_parts(
            Expression::PolynomialVector(Vector::new(left)),
            Expression::ConstantVector(Vector::new(right)),
            self.sense(),
            self.shape(),
        ))
    }

    pub fn linear_inequality_representation(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<LinearSystem, ExprError> {
        self.check()?;
        require_sense(self.sense(), false)?;
        self.system(wrt)
    }

    pub fn linear_equality_representation(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<LinearSystem, ExprError> {
        self.check()?;
        require_sense(self.sense(), true)?;
        self.system(wrt)
    }

    fn system(&self, wrt: Option<&[Variable]>) -> Result<LinearSystem, ExprError> {
        let variables = wrt.map_or_else(|| self.variables(), <[Variable]>::to_vec);
        linear_system(
            self.left(),
            self.right(),
            self.sense(),
            &self.constraints(),
            variables,
        )
    }
}

impl MatrixConstraint {
    pub fn simplified(&self) -> Result<MatrixConstraint, ExprError> {
        self.check()?;
        let shape: Shape = self.shape();
        let (left, right) = split_all(&self.constraints());
        Ok(MatrixConstraint::from_parts(
            Expression::PolynomialMatrix(Matrix::from_parts(shape, left)),
            Expression::ConstantMatrix(Matrix::from_parts(shape, right)),
            self.sense(),
            shape,
        ))
    }

    /// Rows follow the entries in row-major order.
    pub fn linear_inequality_representation(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<LinearSystem, ExprError> {
        self.check()?;
        require_sense(self.sense(), false)?;
        self.system(wrt)
    }

    pub fn linear_equality_representation(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<LinearSystem, ExprError> {
        self.check()?;
        require_sense(self.sense(), true)?;
        self.system(wrt)
    }

    fn system(&self, wrt: Option<&[Variable]>) -> Result<LinearSystem, ExprError> {
        let variables = wrt.map_or_else(|| self.variables(), <[Variable]>::to_vec);
        linear_system(
            self.left(),
            self.right(),
            self.sense(),
            &self.constraints(),
            variables,
        )
    }
}

impl Constraint {
    pub fn simplified(&self) -> Result<Constraint, ExprError> {
        Ok(match self {
            Constraint::Scalar(c) => Constraint::Scalar(c.simplified()?),
            Constraint::Vector(c) => Constraint::Vector(c.simplified()?),
            Constraint::Matrix(c) => Constraint::Matrix(c.simplified()?),
        })
    }

    /// Linear system of any constraint form; a scalar constraint gives one row.
    pub fn linear_representation(
        &self,
        wrt: Option<&[Variable]>,
    ) -> Result<LinearSystem, ExprError> {
        self.check()?;
        let variables = wrt.map_or_else(|| self.variables(), <[Variable]>::to_vec);
        match self {
            Constraint::Scalar(c) => linear_system(
                &Expression::from(c.left().clone()),
                &Expression::from(c.right().clone()),
                c.sense(),
                std::slice::from_ref(c),
                variables,
            ),
            Constraint::Vector(c) => linear_system(
                c.left(),
                c.right(),
                c.sense(),
                &c.constraints(),
                variables,
            ),
            Constraint::Matrix(c) => linear_system(
                c.left(),
                c.right(),
                c.sense(),
                &c.constraints(),
                variables,
            ),
        }
    }
}
