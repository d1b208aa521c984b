use serde::{Deserialize, Serialize};

/// Identifier of a decision variable.
///
/// Ids are handed out by an [`Environment`](crate::env::Environment); the
/// maximum `u32` value is reserved for variables that were never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VariableId(u32);

impl VariableId {
    /// Sentinel carried by variables that did not come from an allocator.
    pub const UNDEFINED: VariableId = VariableId(u32::MAX);

    /// Get the inner u32 value.
    pub fn inner(self) -> u32 {
        self.0
    }

    /// Create an ID from a u32 value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Whether this id was produced by an allocator.
    pub fn is_defined(self) -> bool {
        self != Self::UNDEFINED
    }
}

impl Default for VariableId {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_defined() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("?")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VariableId;

    #[test]
    fn variable_id_roundtrip() {
        let id = VariableId::new(7);
        assert_eq!(id.inner(), 7);
        assert!(id.is_defined());
    }

    #[test]
    fn default_id_is_undefined() {
        let id = VariableId::default();
        assert_eq!(id, VariableId::UNDEFINED);
        assert!(!id.is_defined());
        assert_eq!(id.to_string(), "?");
    }
}
