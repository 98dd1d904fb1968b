//! Error types for entity sources.

use thiserror::Error;

use crate::base::EntityId;

/// Errors reported by an entity source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// An entity with this identifier already exists in the source.
    #[error("Duplicate entity: {0}")]
    DuplicateEntity(EntityId),

    /// The source does not define this identifier.
    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// Failure reported by an external provider.
    #[error("External source error: {0}")]
    External(String),
}

impl SourceError {
    /// Create an external provider error.
    pub fn external(message: impl Into<String>) -> Self {
        Self::External(message.into())
    }
}
