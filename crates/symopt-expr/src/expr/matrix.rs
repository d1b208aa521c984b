//! Rectangular matrices of scalar elements.

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::expr::constant::Constant;
use crate::expr::monomial::Monomial;
use crate::expr::polynomial::Polynomial;
use crate::expr::scalar::Element;
use crate::expr::variable::{Variable, unique_variables};
use crate::shape::Shape;

pub type ConstantMatrix = Matrix<Constant>;
pub type VariableMatrix = Matrix<Variable>;
pub type MonomialMatrix = Matrix<Monomial>;
pub type PolynomialMatrix = Matrix<Polynomial>;

/// Row-major rectangular buffer. The shape is fixed at construction, where
/// ragged input is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Build from rows; every row must be as long as the first one.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ExprError> {
        let expected = rows.first().map_or(0, Vec::len);
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(ExprError::RaggedRow {
                row,
                expected,
                actual,
            });
        }
        let shape = Shape::new(rows.len(), expected);
        Ok(Self::from_parts(shape, rows.into_iter().flatten().collect()))
    }

    /// `data` is row-major and must hold `shape.len()` elements.
    pub(crate) fn from_parts(shape: Shape, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self {
            rows: shape.rows,
            cols: shape.cols,
            data,
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Elements in row-major order.
    pub fn elements(&self) -> &[T] {
        &self.data
    }

    pub fn into_elements(self) -> Vec<T> {
        self.data
    }

    /// Non-empty, rectangular, and every element valid.
    pub fn check(&self) -> Result<(), ExprError> {
        if self.data.is_empty() || self.rows == 0 || self.cols == 0 {
            return Err(ExprError::EmptyMatrix);
        }
        if self.data.len() != self.rows * self.cols {
            let row = self.data.len().min(self.rows * self.cols) / self.cols;
            let actual = self.data.len().saturating_sub(row * self.cols);
            return Err(ExprError::RaggedRow {
                row,
                expected: self.cols,
                actual,
            });
        }
        self.data.iter().try_for_each(Element::check)
    }

    pub fn at(&self, row: usize, col: usize) -> Result<&T, ExprError> {
        if row >= self.rows || col >= self.cols {
            return Err(ExprError::IndexOutOfBounds {
                row,
                col,
                shape: self.shape(),
            });
        }
        Ok(&self.data[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> Result<&[T], ExprError> {
        if row >= self.rows {
            return Err(ExprError::IndexOutOfBounds {
                row,
                col: 0,
                shape: self.shape(),
            });
        }
        Ok(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Distinct variables across all elements, in row-major first-seen order.
    pub fn variables(&self) -> Vec<Variable> {
        unique_variables(self.data.iter().flat_map(|e| e.to_scalar().variables()))
    }

    pub(crate) fn transposed(&self) -> Matrix<T> {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col].clone());
            }
        }
        Matrix::from_parts(self.shape().transposed(), data)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for row in 0..self.rows {
            if row > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for col in 0..self.cols {
                if col > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.data[row * self.cols + col])?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}
