//! Contracts of entity sources.
//!
//! The engine never stores semantic entities itself; it reads them from
//! sources and routes writes back to them. Capabilities are discovered at
//! runtime: a source opts into writes via [`EntitySource::as_writable`] and
//! into lazy materialization via [`EntitySource::as_external`].

use indexmap::IndexMap;
use std::future::Future;
use std::pin::Pin;

use super::entity::SemanticEntity;
use super::error::SourceError;
use crate::base::{EntityId, ModelId};

/// Boxed future returned by asynchronous source operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A provider of semantic entities keyed by identifier.
pub trait EntitySource {
    fn id(&self) -> &ModelId;

    /// Human readable name of the source.
    fn alias(&self) -> Option<&str> {
        None
    }

    /// Current entities, in the source's own order.
    fn entities(&self) -> &IndexMap<EntityId, SemanticEntity>;

    /// Write capability, if the source is editable.
    fn as_writable(&mut self) -> Option<&mut dyn WritableEntitySource> {
        None
    }

    /// Surroundings capability, if the source is an external catalogue.
    fn as_external(&mut self) -> Option<&mut dyn ExternalEntitySource> {
        None
    }
}

/// Write contract of editable sources.
pub trait WritableEntitySource {
    fn create_entity(&mut self, entity: SemanticEntity) -> Result<EntityId, SourceError>;

    /// Replace the snapshot stored under `entity.id()`.
    fn update_entity(&mut self, entity: SemanticEntity) -> Result<(), SourceError>;

    fn delete_entity(&mut self, id: &EntityId) -> Result<SemanticEntity, SourceError>;
}

/// External, read-only catalogues only materialize part of their content.
///
/// Both operations may suspend; once the future resolves the caller must
/// hand control back to the aggregator (`Aggregator::refresh_source`) so the
/// change is propagated.
pub trait ExternalEntitySource {
    /// Materialize a class together with its relationships and neighbours.
    fn allow_class_surroundings<'a>(
        &'a mut self,
        class: &'a EntityId,
    ) -> BoxFuture<'a, Result<(), SourceError>>;

    /// Drop what [`allow_class_surroundings`](Self::allow_class_surroundings)
    /// materialized for this class.
    fn release_class_surroundings<'a>(
        &'a mut self,
        class: &'a EntityId,
    ) -> BoxFuture<'a, Result<(), SourceError>>;
}
