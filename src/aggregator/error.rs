//! Error types for aggregator operations.

use thiserror::Error;

use crate::base::ModelId;
use crate::semantic::SourceError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregatorError {
    /// No entity source with this identifier is registered.
    #[error("Unknown source model: {0}")]
    UnknownModel(ModelId),

    /// No visual model with this identifier is registered.
    #[error("Unknown visual model: {0}")]
    UnknownVisualModel(ModelId),

    /// A source or visual model with this identifier is already registered.
    #[error("Model already registered: {0}")]
    DuplicateModel(ModelId),

    /// The source exists but does not accept writes.
    #[error("Source model {0} is read-only")]
    ReadOnlySource(ModelId),

    /// The source rejected the write.
    #[error(transparent)]
    Source(#[from] SourceError),
}
