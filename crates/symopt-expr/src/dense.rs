//! Conversions between constant containers and nalgebra dense values.

use nalgebra::{DMatrix, DVector};

use crate::expr::constant::Constant;
use crate::expr::expression::Expression;
use crate::expr::matrix::{ConstantMatrix, Matrix};
use crate::expr::vector::{ConstantVector, Vector};
use crate::shape::Shape;

impl ConstantVector {
    pub fn from_values(values: &[f64]) -> Self {
        values.iter().copied().map(Constant).collect()
    }

    pub fn to_dense(&self) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.iter().map(|k| k.0))
    }
}

impl From<&DVector<f64>> for ConstantVector {
    fn from(value: &DVector<f64>) -> Self {
        value.iter().copied().map(Constant).collect()
    }
}

impl From<DVector<f64>> for ConstantVector {
    fn from(value: DVector<f64>) -> Self {
        ConstantVector::from(&value)
    }
}

impl ConstantMatrix {
    /// `n x n` identity.
    pub fn identity(n: usize) -> Self {
        ConstantMatrix::from(&DMatrix::<f64>::identity(n, n))
    }

    /// Square matrix with `values` on the diagonal.
    pub fn from_diagonal(values: &[f64]) -> Self {
        ConstantMatrix::from(&DMatrix::from_diagonal(&DVector::from_column_slice(values)))
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        DMatrix::from_row_iterator(self.rows(), self.cols(), self.elements().iter().map(|k| k.0))
    }
}

impl From<&DMatrix<f64>> for ConstantMatrix {
    fn from(value: &DMatrix<f64>) -> Self {
        let (rows, cols) = value.shape();
        let mut data = Vec::with_capacity(rows * cols);
        for row in value.row_iter() {
            data.extend(row.iter().copied().map(Constant));
        }
        Matrix::from_parts(Shape::new(rows, cols), data)
    }
}

impl From<DMatrix<f64>> for ConstantMatrix {
    fn from(value: DMatrix<f64>) -> Self {
        ConstantMatrix::from(&value)
    }
}

impl From<&DVector<f64>> for Expression {
    fn from(value: &DVector<f64>) -> Self {
        Expression::ConstantVector(Vector::from(value))
    }
}

impl From<&DMatrix<f64>> for Expression {
    fn from(value: &DMatrix<f64>) -> Self {
        Expression::ConstantMatrix(Matrix::from(value))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn matrix_round_trip_is_row_major() {
        let dense = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let m = ConstantMatrix::from(&dense);
        assert_eq!(m.shape(), Shape::new(2, 3));
        assert_eq!(m.at(0, 2), Ok(&Constant(3.0)));
        assert_eq!(m.to_dense(), dense);
    }

    #[test]
    fn identity_and_diagonal() {
        assert_eq!(ConstantMatrix::identity(2).to_string(), "[[1, 0], [0, 1]]");
        assert_eq!(
            ConstantMatrix::from_diagonal(&[1.0, 2.0]).to_string(),
            "[[1, 0], [0, 2]]"
        );
    }

    #[test]
    fn vector_from_dense() {
        let v = ConstantVector::from(DVector::from_vec(vec![1.0, -1.0]));
        assert_eq!(v, ConstantVector::from_values(&[1.0, -1.0]));
        assert_eq!(v.to_dense()[1], -1.0);
    }
}
