//! The visual model store.
//!
//! Every write is a single synchronous mutation, visible immediately and
//! recorded in a change journal. There is no transactional batching:
//! callers composing multi-step edits must leave the model consistent after
//! each of their own steps.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::entity::{
    NewVisualDiagramNode, NewVisualNode, NewVisualProfileRelationship, NewVisualRelationship,
    VisualDiagramNode, VisualEntity, VisualEntityPatch, VisualNode, VisualProfileRelationship,
    VisualRelationship,
};
use super::error::VisualModelError;
use super::legacy::LegacyVisualEntity;
use crate::base::{EntityId, LanguageString, ModelId};

/// Persisted schema generation of a visual model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SchemaVersion {
    /// Nodes without owning model, edges without visual endpoints.
    V0,
    V1,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V1;
}

impl TryFrom<u32> for SchemaVersion {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::V0),
            1 => Ok(Self::V1),
            other => Err(format!("unsupported visual model schema version {other}")),
        }
    }
}

impl From<SchemaVersion> for u32 {
    fn from(value: SchemaVersion) -> Self {
        match value {
            SchemaVersion::V0 => 0,
            SchemaVersion::V1 => 1,
        }
    }
}

/// Per semantic source styling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelData {
    #[serde(default)]
    pub color: Option<SmolStr>,
}

/// A journal entry describing one write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisualChange {
    Added(EntityId),
    Updated(EntityId),
    Removed(EntityId),
    ModelDataChanged(ModelId),
}

/// One view of the semantic graph.
#[derive(Clone, Debug)]
pub struct VisualModel {
    id: ModelId,
    label: LanguageString,
    writable: bool,
    initial_schema_version: SchemaVersion,
    models_data: IndexMap<ModelId, ModelData>,
    entities: IndexMap<EntityId, VisualEntity>,
    /// Index: represented id -> visual ids, in insertion order.
    by_represented: FxHashMap<EntityId, Vec<EntityId>>,
    legacy: IndexMap<EntityId, LegacyVisualEntity>,
    changes: Vec<VisualChange>,
}

impl VisualModel {
    /// Create an empty, writable visual model at the current schema.
    pub fn new(id: impl Into<ModelId>) -> Self {
        Self {
            id: id.into(),
            label: LanguageString::new(),
            writable: true,
            initial_schema_version: SchemaVersion::CURRENT,
            models_data: IndexMap::new(),
            entities: IndexMap::new(),
            by_represented: FxHashMap::default(),
            legacy: IndexMap::new(),
            changes: Vec::new(),
        }
    }

    /// Create an empty visual model that rejects writes.
    pub fn read_only(id: impl Into<ModelId>) -> Self {
        Self {
            writable: false,
            ..Self::new(id)
        }
    }

    pub fn with_label(mut self, label: LanguageString) -> Self {
        self.label = label;
        self
    }

    // ── Read ────────────────────────────────────────────────────────

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn label(&self) -> &LanguageString {
        &self.label
    }

    /// Capability check; writes to a model failing it are rejected.
    pub fn is_writable_visual_model(&self) -> bool {
        self.writable
    }

    pub fn initial_schema_version(&self) -> SchemaVersion {
        self.initial_schema_version
    }

    pub fn get_visual_entity(&self, id: &EntityId) -> Option<&VisualEntity> {
        self.entities.get(id)
    }

    /// Every visual entity standing for `represented`. A semantic entity may
    /// be drawn several times on the same view.
    pub fn get_visual_entities_for_represented(
        &self,
        represented: &EntityId,
    ) -> Vec<&VisualEntity> {
        self.by_represented
            .get(represented)
            .into_iter()
            .flatten()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    /// Ordinary nodes drawn for a semantic entity.
    pub fn nodes_for_represented(&self, represented: &EntityId) -> Vec<&VisualNode> {
        self.get_visual_entities_for_represented(represented)
            .into_iter()
            .filter_map(VisualEntity::as_node)
            .collect()
    }

    pub fn get_model_color(&self, model: &ModelId) -> Option<&str> {
        self.models_data
            .get(model)
            .and_then(|data| data.color.as_deref())
    }

    pub fn get_models_data(&self) -> &IndexMap<ModelId, ModelData> {
        &self.models_data
    }

    pub fn entities(&self) -> impl Iterator<Item = &VisualEntity> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn legacy_entities(&self) -> &IndexMap<EntityId, LegacyVisualEntity> {
        &self.legacy
    }

    // ── Write ───────────────────────────────────────────────────────

    pub fn add_visual_node(&mut self, spec: NewVisualNode) -> Result<EntityId, VisualModelError> {
        self.ensure_writable()?;
        let id = EntityId::generate();
        self.put(VisualEntity::Node(VisualNode {
            id: id.clone(),
            represented_entity: spec.represented_entity,
            model: spec.model,
            position: spec.position,
            content: spec.content,
            visual_models: spec.visual_models,
        }));
        Ok(id)
    }

    pub fn add_visual_relationship(
        &mut self,
        spec: NewVisualRelationship,
    ) -> Result<EntityId, VisualModelError> {
        self.ensure_writable()?;
        self.ensure_endpoints(&spec.visual_source, &spec.visual_target)?;
        let id = EntityId::generate();
        self.put(VisualEntity::Relationship(VisualRelationship {
            id: id.clone(),
            represented_relationship: spec.represented_relationship,
            model: spec.model,
            visual_source: spec.visual_source,
            visual_target: spec.visual_target,
            waypoints: spec.waypoints,
        }));
        Ok(id)
    }

    pub fn add_visual_profile_relationship(
        &mut self,
        spec: NewVisualProfileRelationship,
    ) -> Result<EntityId, VisualModelError> {
        self.ensure_writable()?;
        self.ensure_endpoints(&spec.visual_source, &spec.visual_target)?;
        let id = EntityId::generate();
        self.put(VisualEntity::ProfileRelationship(VisualProfileRelationship {
            id: id.clone(),
            entity: spec.entity,
            model: spec.model,
            visual_source: spec.visual_source,
            visual_target: spec.visual_target,
            waypoints: spec.waypoints,
        }));
        Ok(id)
    }

    pub fn add_visual_diagram_node(
        &mut self,
        spec: NewVisualDiagramNode,
    ) -> Result<EntityId, VisualModelError> {
        self.ensure_writable()?;
        let id = EntityId::generate();
        self.put(VisualEntity::DiagramNode(VisualDiagramNode {
            id: id.clone(),
            represented_visual_model: spec.represented_visual_model,
            position: spec.position,
            label: spec.label,
            description: spec.description,
        }));
        Ok(id)
    }

    /// Apply `patch` to one visual entity.
    ///
    /// A new edge endpoint must be a node of this model, as when adding an
    /// edge; nothing is changed if it is not.
    pub fn update_visual_entity(
        &mut self,
        id: &EntityId,
        patch: VisualEntityPatch,
    ) -> Result<(), VisualModelError> {
        self.ensure_writable()?;
        let is_edge = self
            .entities
            .get(id)
            .ok_or_else(|| VisualModelError::UnknownEntity(id.clone()))?
            .endpoints()
            .is_some();
        if is_edge {
            for endpoint in patch.visual_source.iter().chain(&patch.visual_target) {
                self.ensure_endpoint(endpoint)?;
            }
        }
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| VisualModelError::UnknownEntity(id.clone()))?;
        patch.apply(entity);
        self.changes.push(VisualChange::Updated(id.clone()));
        Ok(())
    }

    pub fn delete_visual_entity(&mut self, id: &EntityId) -> Result<VisualEntity, VisualModelError> {
        self.ensure_writable()?;
        self.remove(id)
            .ok_or_else(|| VisualModelError::UnknownEntity(id.clone()))
    }

    /// Delete several entities in one call; unknown ids are skipped.
    ///
    /// Returns the entities that were actually removed.
    pub fn delete_visual_entities(
        &mut self,
        ids: &[EntityId],
    ) -> Result<Vec<VisualEntity>, VisualModelError> {
        self.ensure_writable()?;
        Ok(ids.iter().filter_map(|id| self.remove(id)).collect())
    }

    pub fn set_model_color(
        &mut self,
        model: &ModelId,
        color: impl Into<SmolStr>,
    ) -> Result<(), VisualModelError> {
        self.ensure_writable()?;
        self.models_data.entry(model.clone()).or_default().color = Some(color.into());
        self.changes.push(VisualChange::ModelDataChanged(model.clone()));
        Ok(())
    }

    pub fn delete_model_data(&mut self, model: &ModelId) -> Result<(), VisualModelError> {
        self.ensure_writable()?;
        if self.models_data.shift_remove(model).is_some() {
            self.changes.push(VisualChange::ModelDataChanged(model.clone()));
        }
        Ok(())
    }

    /// Drain the change journal.
    pub fn take_changes(&mut self) -> Vec<VisualChange> {
        std::mem::take(&mut self.changes)
    }

    // ── Crate internals (loading and migration) ─────────────────────

    pub(crate) fn from_parts(
        id: ModelId,
        label: LanguageString,
        writable: bool,
        initial_schema_version: SchemaVersion,
        models_data: IndexMap<ModelId, ModelData>,
    ) -> Self {
        Self {
            label,
            writable,
            initial_schema_version,
            models_data,
            ..Self::new(id)
        }
    }

    /// Insert without capability checks.
    pub(crate) fn put(&mut self, entity: VisualEntity) {
        let id = entity.id().clone();
        let represented = entity.represented().clone();
        if let Some(previous) = self.entities.insert(id.clone(), entity) {
            self.unindex(&id, previous.represented());
            self.changes.push(VisualChange::Updated(id.clone()));
        } else {
            self.changes.push(VisualChange::Added(id.clone()));
        }
        self.by_represented.entry(represented).or_default().push(id);
    }

    /// Remove without capability checks.
    pub(crate) fn remove(&mut self, id: &EntityId) -> Option<VisualEntity> {
        let removed = self.entities.shift_remove(id)?;
        self.unindex(id, removed.represented());
        self.changes.push(VisualChange::Removed(id.clone()));
        Some(removed)
    }

    pub(crate) fn stage_legacy(&mut self, entity: LegacyVisualEntity) {
        self.legacy.insert(entity.id().clone(), entity);
    }

    pub(crate) fn take_legacy(&mut self) -> IndexMap<EntityId, LegacyVisualEntity> {
        std::mem::take(&mut self.legacy)
    }

    pub(crate) fn models_data_mut(&mut self) -> &mut IndexMap<ModelId, ModelData> {
        &mut self.models_data
    }

    pub(crate) fn mark_migrated(&mut self) {
        self.initial_schema_version = SchemaVersion::CURRENT;
    }

    fn ensure_writable(&self) -> Result<(), VisualModelError> {
        if self.writable {
            Ok(())
        } else {
            Err(VisualModelError::ReadOnly(self.id.clone()))
        }
    }

    fn ensure_endpoints(&self, source: &EntityId, target: &EntityId) -> Result<(), VisualModelError> {
        self.ensure_endpoint(source)?;
        self.ensure_endpoint(target)
    }

    fn ensure_endpoint(&self, endpoint: &EntityId) -> Result<(), VisualModelError> {
        let is_node = self
            .entities
            .get(endpoint)
            .is_some_and(VisualEntity::is_node_like);
        if is_node {
            Ok(())
        } else {
            Err(VisualModelError::UnknownEndpoint(endpoint.clone()))
        }
    }

    fn unindex(&mut self, id: &EntityId, represented: &EntityId) {
        if let Some(ids) = self.by_represented.get_mut(represented) {
            ids.retain(|existing| existing != id);
            if ids.is_empty() {
                self.by_represented.remove(represented);
            }
        }
    }
}
