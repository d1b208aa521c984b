//! Shapes of expressions and the broadcast rules shared by the operators.

use serde::{Deserialize, Serialize};

/// `(rows, cols)` of an expression. Scalars are `1x1`, vectors are `nx1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const SCALAR: Shape = Shape { rows: 1, cols: 1 };

    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Shape of a column vector with `len` entries.
    pub fn column(len: usize) -> Self {
        Self { rows: len, cols: 1 }
    }

    /// Shape with rows and columns swapped.
    pub fn transposed(self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Number of entries.
    pub fn len(self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(self) -> bool {
        self == Self::SCALAR
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

/// Container form of an expression, independent of its element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Form {
    Scalar,
    Vector,
    Matrix,
}

impl Form {
    pub fn as_str(self) -> &'static str {
        match self {
            Form::Scalar => "scalar",
            Form::Vector => "vector",
            Form::Matrix => "matrix",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transposed_swaps_dimensions() {
        assert_eq!(Shape::new(2, 5).transposed(), Shape::new(5, 2));
        assert_eq!(Shape::SCALAR.transposed(), Shape::SCALAR);
    }

    #[test]
    fn display_renders_tuple() {
        assert_eq!(Shape::new(3, 4).to_string(), "(3, 4)");
    }

    #[test]
    fn column_shape_has_one_column() {
        let shape = Shape::column(4);
        assert_eq!(shape.cols, 1);
        assert_eq!(shape.len(), 4);
        assert!(!shape.is_scalar());
        assert!(Shape::column(1).is_scalar());
    }
}
