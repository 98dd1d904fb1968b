//! Error types for actions.

use thiserror::Error;

use crate::aggregator::AggregatorError;
use crate::base::{EntityId, ModelId};
use crate::semantic::{EntityKind, SourceError};
use crate::visual::VisualModelError;

/// Why an action was refused. Every variant is reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No visual model is registered, so there is nothing to draw on.
    #[error("There is no active visual model")]
    NoActiveVisualModel,

    /// The active visual model was imported and rejects writes.
    #[error("Visual model {0} is read-only")]
    ReadOnlyVisualModel(ModelId),

    /// No source defines this semantic entity.
    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// The entity exists but its profile chain cannot be resolved.
    #[error("Entity {0} cannot be resolved")]
    UnresolvedEntity(EntityId),

    /// Only classes and class profiles are drawn as nodes.
    #[error("Entity {entity} is a {kind} and cannot be drawn as a node")]
    NotANode { entity: EntityId, kind: EntityKind },

    /// Classes and class profiles cannot be drawn as edges.
    #[error("Entity {entity} is a {kind} and cannot be drawn as an edge")]
    NotARelation { entity: EntityId, kind: EntityKind },

    /// Both ends carry an identifying IRI, or the relation is not two-ended.
    #[error("Domain and range of {0} cannot be determined")]
    UndeterminedDomainRange(EntityId),

    /// A relation is only drawn between nodes already in the visual model.
    #[error("Ends of {relation} are not in the visual model: {}", join(.missing))]
    EndsNotInVisualModel {
        relation: EntityId,
        missing: Vec<EntityId>,
    },

    /// No visual entity with this identifier is in the active visual model.
    #[error("Unknown visual entity: {0}")]
    UnknownVisualEntity(EntityId),

    /// A diagram node would show the visual model it is placed on.
    #[error("A visual model cannot contain itself: {0}")]
    SelfNesting(ModelId),

    /// The source has no search capability.
    #[error("Source model {0} is not an external catalogue")]
    NotExternal(ModelId),

    /// Registering or looking up a model failed.
    #[error(transparent)]
    Aggregator(#[from] AggregatorError),

    /// The visual model rejected the write.
    #[error(transparent)]
    Visual(#[from] VisualModelError),

    /// The source rejected the write.
    #[error(transparent)]
    Source(#[from] SourceError),
}

fn join(ids: &[EntityId]) -> String {
    ids.iter()
        .map(EntityId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
