//! Reading and writing documents as JSON.

use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::document::{SemanticModelDocument, VisualModelDocument};
use super::error::PersistenceError;
use crate::base::EntityId;
use crate::semantic::{EntitySource, InMemorySemanticModel, SemanticEntity};
use crate::visual::{LegacyVisualEntity, SchemaVersion, VisualEntity, VisualModel};

// ============================================================================
// VISUAL MODELS
// ============================================================================

/// Read a visual model document.
///
/// Version 0 entities are staged on the model; register it with the
/// aggregator to have it migrated.
pub fn read_visual_model(input: &[u8]) -> Result<VisualModel, PersistenceError> {
    let document: VisualModelDocument = serde_json::from_slice(input)?;
    let version = SchemaVersion::try_from(document.initial_schema_version)
        .map_err(|_| PersistenceError::UnsupportedVersion(document.initial_schema_version))?;

    let mut model = VisualModel::from_parts(
        document.identifier,
        document.label,
        !document.read_only,
        version,
        document.models_data,
    );
    let mut seen: FxHashSet<EntityId> = FxHashSet::default();
    for (index, value) in document.visual_entities.into_iter().enumerate() {
        let invalid = |err: serde_json::Error| PersistenceError::invalid_visual_entity(index, err.to_string());
        match version {
            SchemaVersion::V0 => {
                let entity: LegacyVisualEntity = serde_json::from_value(value).map_err(invalid)?;
                unique(&mut seen, entity.id())?;
                model.stage_legacy(entity);
            }
            SchemaVersion::V1 => {
                let entity: VisualEntity = serde_json::from_value(value).map_err(invalid)?;
                unique(&mut seen, entity.id())?;
                model.put(entity);
            }
        }
    }
    // Loading is not an edit.
    model.take_changes();

    debug!(
        model = %model.id(),
        version = u32::from(version),
        entities = seen.len(),
        "read visual model"
    );
    Ok(model)
}

/// Write a visual model document.
///
/// A model that was never migrated is written back in its old schema.
pub fn write_visual_model(model: &VisualModel) -> Result<Vec<u8>, PersistenceError> {
    let version = model.initial_schema_version();
    let visual_entities = match version {
        SchemaVersion::V0 => model
            .legacy_entities()
            .values()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?,
        SchemaVersion::V1 => model
            .entities()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?,
    };
    let document = VisualModelDocument {
        identifier: model.id().clone(),
        label: model.label().clone(),
        initial_schema_version: version.into(),
        read_only: !model.is_writable_visual_model(),
        models_data: model.get_models_data().clone(),
        visual_entities,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

pub fn load_visual_model(path: impl AsRef<Path>) -> Result<VisualModel, PersistenceError> {
    read_visual_model(&std::fs::read(path)?)
}

pub fn save_visual_model(
    model: &VisualModel,
    path: impl AsRef<Path>,
) -> Result<(), PersistenceError> {
    std::fs::write(path, write_visual_model(model)?)?;
    Ok(())
}

// ============================================================================
// SEMANTIC MODELS
// ============================================================================

/// Read a semantic source document into an editable in-memory source.
pub fn read_semantic_model(input: &[u8]) -> Result<InMemorySemanticModel, PersistenceError> {
    let document: SemanticModelDocument = serde_json::from_slice(input)?;
    let mut seen: FxHashSet<EntityId> = FxHashSet::default();
    let mut entities = Vec::with_capacity(document.entities.len());
    for (index, value) in document.entities.into_iter().enumerate() {
        let entity: SemanticEntity = serde_json::from_value(value)
            .map_err(|err| PersistenceError::invalid_semantic_entity(index, err.to_string()))?;
        unique(&mut seen, entity.id())?;
        entities.push(entity);
    }
    debug!(model = %document.identifier, entities = entities.len(), "read semantic model");
    Ok(InMemorySemanticModel::from_entities(
        document.identifier,
        document.alias,
        entities,
    ))
}

/// Write any entity source as a semantic model document.
pub fn write_semantic_model(source: &dyn EntitySource) -> Result<Vec<u8>, PersistenceError> {
    let document = SemanticModelDocument {
        identifier: source.id().clone(),
        alias: source.alias().map(str::to_string),
        entities: source
            .entities()
            .values()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

pub fn load_semantic_model(
    path: impl AsRef<Path>,
) -> Result<InMemorySemanticModel, PersistenceError> {
    read_semantic_model(&std::fs::read(path)?)
}

pub fn save_semantic_model(
    source: &dyn EntitySource,
    path: impl AsRef<Path>,
) -> Result<(), PersistenceError> {
    std::fs::write(path, write_semantic_model(source)?)?;
    Ok(())
}

fn unique(seen: &mut FxHashSet<EntityId>, id: &EntityId) -> Result<(), PersistenceError> {
    if seen.insert(id.clone()) {
        Ok(())
    } else {
        Err(PersistenceError::DuplicateIdentifier(id.clone()))
    }
}
