//! Error types for persistence.

use thiserror::Error;

use crate::base::EntityId;

/// Errors that can occur while reading or writing documents.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The document is not valid JSON or does not have the document shape.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error during load/save.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported visual model schema version: {0}")]
    UnsupportedVersion(u32),

    /// An entity of the document is malformed, e.g. misses a required field.
    #[error("Invalid {kind} at index {index}: {message}")]
    InvalidEntity {
        kind: &'static str,
        index: usize,
        message: String,
    },

    /// Two entities of one document share an identifier.
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(EntityId),
}

impl PersistenceError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create an invalid visual entity error.
    pub fn invalid_visual_entity(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            kind: "visual entity",
            index,
            message: message.into(),
        }
    }

    /// Create an invalid semantic entity error.
    pub fn invalid_semantic_entity(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            kind: "semantic entity",
            index,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}
