//! Queries that follow visual diagram nodes into nested visual models.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use super::entity::VisualEntity;
use super::model::VisualModel;
use crate::base::{EntityId, ModelId};

/// Semantic entities drawn as nodes in `model`, including those drawn in
/// visual models nested through diagram nodes, at any depth.
///
/// Nested models are looked up in `available`; unknown models contribute
/// nothing and each model is visited once, so nesting cycles terminate.
pub fn represented_entities(
    model: &VisualModel,
    available: &IndexMap<ModelId, VisualModel>,
) -> FxHashSet<EntityId> {
    let mut represented = FxHashSet::default();
    let mut visited: FxHashSet<&ModelId> = FxHashSet::default();
    let mut pending = vec![model];
    visited.insert(model.id());

    while let Some(current) = pending.pop() {
        for entity in current.entities() {
            match entity {
                VisualEntity::Node(node) => {
                    represented.insert(node.represented_entity.clone());
                }
                VisualEntity::DiagramNode(diagram) => {
                    let nested = &diagram.represented_visual_model;
                    if visited.insert(nested) {
                        if let Some(nested_model) = available.get(nested) {
                            pending.push(nested_model);
                        }
                    }
                }
                VisualEntity::Relationship(_) | VisualEntity::ProfileRelationship(_) => {}
            }
        }
    }
    represented
}
