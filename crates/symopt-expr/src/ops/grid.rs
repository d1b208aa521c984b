//! Flattened view of an expression used by the elementwise operators.

use crate::error::{ExprError, Side};
use crate::expr::expression::Expression;
use crate::expr::matrix::Matrix;
use crate::expr::scalar::{Element, ScalarExpr, ScalarKind};
use crate::expr::vector::Vector;
use crate::shape::{Form, Shape};

/// Elements of an expression in row-major order, with its form and shape.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    pub(crate) form: Form,
    pub(crate) shape: Shape,
    pub(crate) elements: Vec<ScalarExpr>,
}

impl Grid {
    pub(crate) fn new(form: Form, shape: Shape, elements: Vec<ScalarExpr>) -> Self {
        Self {
            form,
            shape,
            elements,
        }
    }

    pub(crate) fn of(expr: &Expression) -> Self {
        Self::new(expr.form(), expr.dims(), expr.to_scalars())
    }

    /// Element `idx`, repeating the single element of a scalar.
    pub(crate) fn broadcast(&self, idx: usize) -> &ScalarExpr {
        match self.form {
            Form::Scalar => &self.elements[0],
            Form::Vector | Form::Matrix => &self.elements[idx],
        }
    }

    /// Least general element kind able to hold every element.
    pub(crate) fn kind(&self) -> ScalarKind {
        self.elements
            .iter()
            .map(ScalarExpr::kind)
            .reduce(ScalarKind::join)
            .unwrap_or(ScalarKind::Constant)
    }

    /// Rebuild a typed expression, promoting every element to the joined kind.
    pub(crate) fn into_expression(self) -> Result<Expression, ExprError> {
        let kind = self.kind();
        match self.form {
            Form::Scalar => self
                .elements
                .into_iter()
                .next()
                .map(Expression::from)
                .ok_or(ExprError::IndexOutOfBounds {
                    row: 0,
                    col: 0,
                    shape: self.shape,
                }),
            Form::Vector => Ok(match kind {
                ScalarKind::Constant => {
                    Expression::ConstantVector(Vector::new(promote_all(self.elements)?))
                }
                ScalarKind::Variable => {
                    Expression::VariableVector(Vector::new(promote_all(self.elements)?))
                }
                ScalarKind::Monomial => {
                    Expression::MonomialVector(Vector::new(promote_all(self.elements)?))
                }
                ScalarKind::Polynomial => {
                    Expression::PolynomialVector(Vector::new(promote_all(self.elements)?))
                }
            }),
            Form::Matrix => {
                let shape = self.shape;
                Ok(match kind {
                    ScalarKind::Constant => Expression::ConstantMatrix(Matrix::from_parts(
                        shape,
                        promote_all(self.elements)?,
                    )),
                    ScalarKind::Variable => Expression::VariableMatrix(Matrix::from_parts(
                        shape,
                        promote_all(self.elements)?,
                    )),
                    ScalarKind::Monomial => Expression::MonomialMatrix(Matrix::from_parts(
                        shape,
                        promote_all(self.elements)?,
                    )),
                    ScalarKind::Polynomial => Expression::PolynomialMatrix(Matrix::from_parts(
                        shape,
                        promote_all(self.elements)?,
                    )),
                })
            }
        }
    }

    /// Apply `f` to every element, keeping form and shape.
    pub(crate) fn map<F>(&self, f: F) -> Grid
    where
        F: Fn(&ScalarExpr) -> ScalarExpr,
    {
        Grid::new(self.form, self.shape, self.elements.iter().map(f).collect())
    }
}

fn promote_all<T: Element>(elements: Vec<ScalarExpr>) -> Result<Vec<T>, ExprError> {
    elements.into_iter().map(ScalarExpr::into_element).collect()
}

/// Form and shape of an elementwise result, broadcasting scalars.
pub(crate) fn elementwise_layout(
    operation: &'static str,
    left: &Grid,
    right: &Grid,
) -> Result<(Form, Shape), ExprError> {
    match (left.form, right.form) {
        (Form::Scalar, Form::Scalar) => Ok((Form::Scalar, Shape::SCALAR)),
        (Form::Scalar, form) => Ok((form, right.shape)),
        (form, Form::Scalar) => Ok((form, left.shape)),
        (l, r) if left.shape == right.shape => {
            let form = if l == Form::Vector || r == Form::Vector {
                Form::Vector
            } else {
                Form::Matrix
            };
            Ok((form, left.shape))
        }
        (l, r) => Err(shape_mismatch(operation, l, r, left.shape, right.shape)),
    }
}

/// Shape error specific to the operand forms.
pub(crate) fn shape_mismatch(
    operation: &'static str,
    left_form: Form,
    right_form: Form,
    left: Shape,
    right: Shape,
) -> ExprError {
    tracing::debug!(
        component = "ops",
        operation,
        status = "rejected",
        left = %left,
        right = %right,
        "Operand shapes do not match"
    );
    match (left_form, right_form) {
        (Form::Vector, Form::Vector) => ExprError::VectorDimensionMismatch {
            operation,
            left,
            right,
        },
        (Form::Matrix, Form::Matrix) => ExprError::MatrixDimensionMismatch {
            operation,
            left,
            right,
        },
        _ => ExprError::DimensionMismatch {
            operation,
            left,
            right,
        },
    }
}

/// Combine two grids element by element.
pub(crate) fn combine_elementwise<F>(
    operation: &'static str,
    left: &Grid,
    right: &Grid,
    f: F,
) -> Result<Expression, ExprError>
where
    F: Fn(&ScalarExpr, &ScalarExpr) -> ScalarExpr,
{
    let (form, shape) = elementwise_layout(operation, left, right)?;
    let elements = (0..shape.len())
        .map(|idx| f(left.broadcast(idx), right.broadcast(idx)))
        .collect();
    Grid::new(form, shape, elements).into_expression()
}

/// Validate both operands, left first.
pub(crate) fn check_operands(
    operation: &'static str,
    left: &Expression,
    right: &Expression,
) -> Result<(), ExprError> {
    check_operand(operation, Side::Left, left)?;
    check_operand(operation, Side::Right, right)
}

pub(crate) fn check_operand(
    operation: &'static str,
    side: Side,
    expr: &Expression,
) -> Result<(), ExprError> {
    expr.check().map_err(|source| {
        tracing::debug!(
            component = "ops",
            operation,
            status = "rejected",
            side = side.as_str(),
            code = source.code(),
            "Invalid operand"
        );
        ExprError::operand(operation, side, source)
    })
}
