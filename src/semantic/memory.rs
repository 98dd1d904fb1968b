//! Editable in-memory entity source.

use indexmap::IndexMap;

use super::entity::SemanticEntity;
use super::error::SourceError;
use super::source::{EntitySource, WritableEntitySource};
use crate::base::{EntityId, ModelId};

/// An editable source keeping its entities in insertion order.
#[derive(Clone, Debug, Default)]
pub struct InMemorySemanticModel {
    id: ModelId,
    alias: Option<String>,
    entities: IndexMap<EntityId, SemanticEntity>,
}

impl InMemorySemanticModel {
    pub fn new(id: impl Into<ModelId>) -> Self {
        Self {
            id: id.into(),
            alias: None,
            entities: IndexMap::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Builder-style insert, replacing any entity with the same id.
    pub fn with_entity(mut self, entity: impl Into<SemanticEntity>) -> Self {
        let entity = entity.into();
        self.entities.insert(entity.id().clone(), entity);
        self
    }

    pub fn from_entities(
        id: impl Into<ModelId>,
        alias: Option<String>,
        entities: impl IntoIterator<Item = SemanticEntity>,
    ) -> Self {
        Self {
            id: id.into(),
            alias,
            entities: entities
                .into_iter()
                .map(|entity| (entity.id().clone(), entity))
                .collect(),
        }
    }

    pub fn get(&self, id: &EntityId) -> Option<&SemanticEntity> {
        self.entities.get(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntitySource for InMemorySemanticModel {
    fn id(&self) -> &ModelId {
        &self.id
    }

    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn entities(&self) -> &IndexMap<EntityId, SemanticEntity> {
        &self.entities
    }

    fn as_writable(&mut self) -> Option<&mut dyn WritableEntitySource> {
        Some(self)
    }
}

impl WritableEntitySource for InMemorySemanticModel {
    fn create_entity(&mut self, entity: SemanticEntity) -> Result<EntityId, SourceError> {
        let id = entity.id().clone();
        if self.entities.contains_key(&id) {
            return Err(SourceError::DuplicateEntity(id));
        }
        self.entities.insert(id.clone(), entity);
        Ok(id)
    }

    fn update_entity(&mut self, entity: SemanticEntity) -> Result<(), SourceError> {
        match self.entities.get_mut(entity.id()) {
            Some(slot) => {
                *slot = entity;
                Ok(())
            }
            None => Err(SourceError::UnknownEntity(entity.id().clone())),
        }
    }

    fn delete_entity(&mut self, id: &EntityId) -> Result<SemanticEntity, SourceError> {
        self.entities
            .shift_remove(id)
            .ok_or_else(|| SourceError::UnknownEntity(id.clone()))
    }
}
