//! Comparison senses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::GreaterEqual => "ge",
            ComparisonSense::Equal => "eq",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "<=",
            ComparisonSense::GreaterEqual => ">=",
            ComparisonSense::Equal => "=",
        }
    }

    /// Sense after multiplying both sides by a negative number.
    pub fn flipped(self) -> Self {
        match self {
            ComparisonSense::LessEqual => ComparisonSense::GreaterEqual,
            ComparisonSense::GreaterEqual => ComparisonSense::LessEqual,
            ComparisonSense::Equal => ComparisonSense::Equal,
        }
    }

    pub fn is_inequality(self) -> bool {
        self != ComparisonSense::Equal
    }

    /// Whether `lhs <sense> rhs` holds. Equality is exact.
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            ComparisonSense::LessEqual => lhs <= rhs,
            ComparisonSense::GreaterEqual => lhs >= rhs,
            ComparisonSense::Equal => lhs == rhs,
        }
    }
}

impl std::fmt::Display for ComparisonSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipped_swaps_inequalities_only() {
        assert_eq!(ComparisonSense::LessEqual.flipped(), ComparisonSense::GreaterEqual);
        assert_eq!(ComparisonSense::GreaterEqual.flipped(), ComparisonSense::LessEqual);
        assert_eq!(ComparisonSense::Equal.flipped(), ComparisonSense::Equal);
    }

    #[test]
    fn holds_compares_values() {
        assert!(ComparisonSense::LessEqual.holds(1.0, 1.0));
        assert!(!ComparisonSense::GreaterEqual.holds(0.5, 1.0));
        assert!(ComparisonSense::Equal.holds(2.0, 2.0));
        assert!(!ComparisonSense::Equal.holds(2.0, 2.5));
    }
}
