//! # Semantic layer
//!
//! Semantic entities (classes, relationships, generalizations and their
//! profiles), the contracts every entity source fulfils, the editable
//! in-memory source, and the pure resolution functions the aggregator
//! builds on:
//!
//! - [`domain_and_range`] / [`relation_ends`] decide which concepts an edge
//!   connects
//! - [`ProfileResolver`] fills inherited profile fields from the entities
//!   they profile

mod ends;
mod entity;
mod error;
mod memory;
mod resolve;
mod source;

pub use ends::{DomainAndRange, EndShape, RelationEnds, domain_and_range, relation_ends};
pub use entity::{
    Cardinality, ClassProfile, EntityKind, Generalization, RelationshipEnd,
    RelationshipEndProfile, RelationshipProfile, SemanticClass, SemanticEntity,
    SemanticRelationship,
};
pub use error::SourceError;
pub use memory::InMemorySemanticModel;
pub use resolve::{ProfileResolver, ResolveError};
pub use source::{BoxFuture, EntitySource, ExternalEntitySource, WritableEntitySource};

#[cfg(test)]
mod tests;
