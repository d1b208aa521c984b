//! Variable allocation.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::expr::matrix::{Matrix, VariableMatrix};
use crate::expr::variable::{Variable, VariableKind};
use crate::expr::vector::{Vector, VariableVector};
use crate::ids::VariableId;
use crate::shape::Shape;

/// Owns an id space. Every variable created through the same environment
/// gets a distinct id; two environments count independently.
///
/// Ids are only unique within one environment. Variables from different
/// environments, [`Environment::global`] included, compare equal when their
/// ids match and must not be mixed in one expression.
#[derive(Debug)]
pub struct Environment {
    name: String,
    next_id: AtomicU32,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_id: AtomicU32::new(0),
        }
    }

    /// Process-wide environment shared by callers that do not manage their own.
    pub fn global() -> &'static Environment {
        static GLOBAL: OnceLock<Environment> = OnceLock::new();
        GLOBAL.get_or_init(|| Environment::new("global"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of ids handed out so far.
    pub fn num_variables(&self) -> u32 {
        self.next_id.load(Ordering::Relaxed)
    }

    fn allocate_id(&self) -> VariableId {
        VariableId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Continuous variable with no bounds.
    pub fn new_variable(&self) -> Variable {
        self.new_variable_with_bounds(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Continuous variable in `[lower, upper]`. Bounds are stored as given.
    pub fn new_variable_with_bounds(&self, lower: f64, upper: f64) -> Variable {
        Variable::allocated(self.allocate_id(), VariableKind::Continuous, lower, upper)
    }

    pub fn new_binary_variable(&self) -> Variable {
        Variable::allocated(self.allocate_id(), VariableKind::Binary, 0.0, 1.0)
    }

    pub fn new_integer_variable(&self, lower: f64, upper: f64) -> Variable {
        Variable::allocated(self.allocate_id(), VariableKind::Integer, lower, upper)
    }

    /// `len` fresh continuous variables with consecutive ids.
    pub fn new_variable_vector(&self, len: usize) -> VariableVector {
        Vector::new((0..len).map(|_| self.new_variable()).collect())
    }

    /// Fresh continuous variables allocated in row-major order.
    pub fn new_variable_matrix(&self, rows: usize, cols: usize) -> VariableMatrix {
        let data = (0..rows * cols).map(|_| self.new_variable()).collect();
        Matrix::from_parts(Shape::new(rows, cols), data)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_per_allocation() {
        let env = Environment::new("ids");
        let a = env.new_variable();
        let b = env.new_binary_variable();
        assert_eq!(a.id(), VariableId::new(0));
        assert_eq!(b.id(), VariableId::new(1));
        assert_eq!(env.num_variables(), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn environments_have_independent_id_spaces() {
        let first = Environment::new("first");
        let second = Environment::new("second");
        assert_eq!(first.new_variable().id(), second.new_variable().id());
        assert_eq!(first.new_variable(), second.new_variable());
        assert_eq!(first.num_variables(), second.num_variables());
        assert_eq!(first.name(), "first");
    }

    #[test]
    fn binary_variable_bounds() {
        let env = Environment::new("kinds");
        let b = env.new_binary_variable();
        assert_eq!(b.kind(), VariableKind::Binary);
        assert_eq!((b.lower(), b.upper()), (0.0, 1.0));
        let i = env.new_integer_variable(-3.0, 3.0);
        assert_eq!(i.kind(), VariableKind::Integer);
        assert_eq!(i.upper(), 3.0);
    }

    #[test]
    fn matrix_variables_are_row_major() {
        let env = Environment::new("matrix");
        let m = env.new_variable_matrix(2, 3);
        assert_eq!(m.shape(), Shape::new(2, 3));
        assert_eq!(m.at(1, 0).unwrap().id(), VariableId::new(3));
        assert!(m.check().is_ok());
    }

    #[test]
    fn global_environment_is_shared() {
        let a = Environment::global().new_variable();
        let b = Environment::global().new_variable();
        assert!(b.id() > a.id());
    }

    #[test]
    fn allocation_is_thread_safe() {
        let env = Environment::new("threads");
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        env.new_variable();
                    }
                });
            }
        });
        assert_eq!(env.num_variables(), 400);
    }
}
