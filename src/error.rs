//! Error kinds returned by the core plasmid operations.
//!
//! Every fallible operation on [`crate::Plasmid`], [`crate::Gene`] and
//! [`crate::sequence::OrderedSequence`] returns a [`Result`] carrying one of
//! these variants. A failed operation never leaves the plasmid half-mutated.

/// Failure of a core plasmid operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlasmidError {
    /// A node slot or a defensive string copy could not be allocated.
    #[error("memory allocation failed")]
    Allocation,

    /// No gene at the requested 1-based position.
    #[error("no gene at position {0}")]
    PositionNotFound(usize),

    /// No gene carries the requested name.
    #[error("no gene named '{0}'")]
    NameNotFound(String),

    /// The handle does not refer to a live node.
    #[error("stale or unknown node handle")]
    InvalidHandle,

    /// Primer length is zero or longer than the template sequence.
    #[error("invalid primer length {requested} (max {max})")]
    InvalidLength { requested: usize, max: usize },
}

impl PlasmidError {
    /// `true` for every "not found" flavour (position, name, or handle).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlasmidError::PositionNotFound(_) | PlasmidError::NameNotFound(_) | PlasmidError::InvalidHandle
        )
    }
}

/// Shorthand used throughout the core modules.
pub type Result<T> = std::result::Result<T, PlasmidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(PlasmidError::PositionNotFound(4).to_string(), "no gene at position 4");
        let e = PlasmidError::InvalidLength { requested: 9, max: 8 };
        assert_eq!(e.to_string(), "invalid primer length 9 (max 8)");
    }

    #[test]
    fn not_found_covers_all_lookup_failures() {
        assert!(PlasmidError::NameNotFound("lacZ".into()).is_not_found());
        assert!(PlasmidError::InvalidHandle.is_not_found());
        assert!(!PlasmidError::Allocation.is_not_found());
    }
}
