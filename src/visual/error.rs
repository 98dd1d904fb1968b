//! Error types for visual model writes.

use thiserror::Error;

use crate::base::{EntityId, ModelId};

/// Errors that can occur when writing to a [`VisualModel`](super::VisualModel).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisualModelError {
    /// The visual model was imported and does not accept writes.
    #[error("Visual model {0} is read-only")]
    ReadOnly(ModelId),

    /// No visual model with this identifier is registered.
    #[error("Unknown visual model: {0}")]
    UnknownModel(ModelId),

    /// No visual entity with this identifier exists.
    #[error("Unknown visual entity: {0}")]
    UnknownEntity(EntityId),

    /// An edge endpoint is not a node of this visual model.
    #[error("Edge endpoint {0} is not a node of this visual model")]
    UnknownEndpoint(EntityId),
}
