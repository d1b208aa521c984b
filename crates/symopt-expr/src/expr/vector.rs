//! Column vectors of scalar elements.

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::expr::constant::Constant;
use crate::expr::matrix::Matrix;
use crate::expr::monomial::Monomial;
use crate::expr::polynomial::Polynomial;
use crate::expr::scalar::Element;
use crate::expr::variable::{Variable, unique_variables};
use crate::shape::Shape;

pub type ConstantVector = Vector<Constant>;
pub type VariableVector = Vector<Variable>;
pub type MonomialVector = Vector<Monomial>;
pub type PolynomialVector = Vector<Polynomial>;

/// Column vector with shape `(len, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector<T> {
    elements: Vec<T>,
}

impl<T: Element> Vector<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn shape(&self) -> Shape {
        Shape::column(self.elements.len())
    }

    /// Non-empty and every element valid.
    pub fn check(&self) -> Result<(), ExprError> {
        if self.elements.is_empty() {
            return Err(ExprError::EmptyVector);
        }
        self.elements.iter().try_for_each(Element::check)
    }

    /// Element at `index`.
    pub fn at(&self, index: usize) -> Result<&T, ExprError> {
        self.elements
            .get(index)
            .ok_or(ExprError::IndexOutOfBounds {
                row: index,
                col: 0,
                shape: self.shape(),
            })
    }

    /// Distinct variables across all elements, in first-seen order.
    pub fn variables(&self) -> Vec<Variable> {
        unique_variables(self.elements.iter().flat_map(|e| e.to_scalar().variables()))
    }

    /// Row vector holding the same elements.
    pub(crate) fn transposed(&self) -> Matrix<T> {
        Matrix::from_parts(Shape::new(1, self.elements.len()), self.elements.clone())
    }
}

impl<T: Element> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Element> std::ops::Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (idx, element) in self.elements.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("]")
    }
}
