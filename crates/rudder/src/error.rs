//! Error types for the router.

/// Errors produced by router mutations.
///
/// A rejected `add` or `remove` leaves the router untouched; lookups
/// never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// Declared weight was zero or negative.
    #[error("invalid weight {0}: weight must be at least 1")]
    InvalidWeight(i32),

    /// The node is already a member of the ring.
    #[error("node already exists: {0}")]
    NodeAlreadyExists(String),

    /// The node is not a member of the ring.
    #[error("node not found: {0}")]
    NodeNotFound(String),
}
