//! The two validation passes.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::aggregator::{AggregatedEntities, attributes_of, is_node_concept};
use crate::base::{EntityId, ModelId};
use crate::semantic::{RelationEnds, SemanticEntity, relation_ends};
use crate::visual::{
    NewVisualProfileRelationship, VisualEntity, VisualEntityPatch, VisualModel, VisualModelError,
    represented_entities,
};

/// What one validator run changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub model: ModelId,
    pub removed: Vec<EntityId>,
    /// Nodes whose visible attributes were pruned.
    pub updated: Vec<EntityId>,
    /// Synthesized profile edges.
    pub added: Vec<EntityId>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty() && self.added.is_empty()
    }
}

/// Validate and repair the visual model `model_id` in place.
///
/// `models` must hold every registered visual model so that edges ending
/// on diagram nodes can be checked against the nested views.
pub fn validate_visual_model(
    model_id: &ModelId,
    entities: &AggregatedEntities,
    models: &mut IndexMap<ModelId, VisualModel>,
) -> Result<ValidationReport, VisualModelError> {
    let model = models
        .get(model_id)
        .ok_or_else(|| VisualModelError::UnknownModel(model_id.clone()))?;
    if !model.is_writable_visual_model() {
        return Err(VisualModelError::ReadOnly(model_id.clone()));
    }

    let mut report = ValidationReport {
        model: model_id.clone(),
        ..Default::default()
    };

    let plan = plan_structure(model, entities, models);
    let model = models
        .get_mut(model_id)
        .ok_or_else(|| VisualModelError::UnknownModel(model_id.clone()))?;
    for (node, content) in plan.content {
        model.update_visual_entity(&node, VisualEntityPatch::content(content))?;
        report.updated.push(node);
    }
    report.removed.extend(
        model
            .delete_visual_entities(&plan.invalid)?
            .iter()
            .map(|entity| entity.id().clone()),
    );

    let plan = plan_profiles(model, entities);
    report.removed.extend(
        model
            .delete_visual_entities(&plan.unjustified)?
            .iter()
            .map(|entity| entity.id().clone()),
    );
    for spec in plan.missing {
        report.added.push(model.add_visual_profile_relationship(spec)?);
    }

    if !report.is_empty() {
        debug!(
            model = %model_id,
            removed = report.removed.len(),
            updated = report.updated.len(),
            added = report.added.len(),
            "repaired visual model"
        );
    }
    Ok(report)
}

// ============================================================================
// PASS 1: STRUCTURE
// ============================================================================

#[derive(Default)]
struct StructurePlan {
    invalid: Vec<EntityId>,
    content: Vec<(EntityId, Vec<EntityId>)>,
}

fn plan_structure(
    model: &VisualModel,
    entities: &AggregatedEntities,
    models: &IndexMap<ModelId, VisualModel>,
) -> StructurePlan {
    let mut plan = StructurePlan::default();
    let mut invalid: FxHashSet<EntityId> = FxHashSet::default();
    let mut nested_cache: FxHashMap<ModelId, FxHashSet<EntityId>> = FxHashMap::default();

    for entity in model.entities() {
        match entity {
            VisualEntity::Node(node) => {
                if !is_node_concept(entities, &node.represented_entity) {
                    trace!(visual = %node.id, represented = %node.represented_entity, "node is dangling");
                    invalid.insert(node.id.clone());
                    continue;
                }
                let attributes = attributes_of(entities, &node.represented_entity);
                let kept: Vec<EntityId> = node
                    .content
                    .iter()
                    .filter(|attribute| attributes.contains(attribute))
                    .cloned()
                    .collect();
                if kept.len() != node.content.len() {
                    plan.content.push((node.id.clone(), kept));
                }
            }
            VisualEntity::DiagramNode(diagram) => {
                let nested = &diagram.represented_visual_model;
                if nested == model.id() || !models.contains_key(nested) {
                    trace!(visual = %diagram.id, nested = %nested, "diagram node is dangling");
                    invalid.insert(diagram.id.clone());
                }
            }
            VisualEntity::Relationship(edge) => {
                let expected = entities
                    .get(&edge.represented_relationship)
                    .and_then(|wrapper| wrapper.resolved())
                    .map(relation_ends);
                let valid = match expected {
                    Some(RelationEnds::Connects { source, target }) => {
                        is_node_concept(entities, &source)
                            && is_node_concept(entities, &target)
                            && shows(model, models, &mut nested_cache, &edge.visual_source, &source)
                            && shows(model, models, &mut nested_cache, &edge.visual_target, &target)
                    }
                    // Direction is unknown, so the drawn one cannot be checked.
                    Some(RelationEnds::Ambiguous) => {
                        warn!(
                            visual = %edge.id,
                            represented = %edge.represented_relationship,
                            "skipping edge of relationship with ambiguous ends"
                        );
                        true
                    }
                    Some(RelationEnds::Unsupported | RelationEnds::NotARelation) | None => false,
                };
                if !valid {
                    trace!(visual = %edge.id, represented = %edge.represented_relationship, "edge is invalid");
                    invalid.insert(edge.id.clone());
                }
            }
            VisualEntity::ProfileRelationship(edge) => {
                let on_nodes = [&edge.visual_source, &edge.visual_target].into_iter().all(|end| {
                    matches!(model.get_visual_entity(end), Some(VisualEntity::Node(_)))
                });
                if !on_nodes {
                    trace!(visual = %edge.id, "profile edge does not connect two nodes");
                    invalid.insert(edge.id.clone());
                }
            }
        }
    }

    // Edges attached to a removed node go with it.
    for entity in model.entities() {
        if let Some((source, target)) = entity.endpoints() {
            if invalid.contains(source) || invalid.contains(target) {
                invalid.insert(entity.id().clone());
            }
        }
    }

    plan.invalid = model
        .entities()
        .map(VisualEntity::id)
        .filter(|id| invalid.contains(*id))
        .cloned()
        .collect();
    plan.content.retain(|(node, _)| !invalid.contains(node));
    plan
}

/// Does the visual endpoint `visual` show the semantic `concept`?
fn shows(
    model: &VisualModel,
    models: &IndexMap<ModelId, VisualModel>,
    nested_cache: &mut FxHashMap<ModelId, FxHashSet<EntityId>>,
    visual: &EntityId,
    concept: &EntityId,
) -> bool {
    match model.get_visual_entity(visual) {
        Some(VisualEntity::Node(node)) => &node.represented_entity == concept,
        Some(VisualEntity::DiagramNode(diagram)) => {
            let nested = &diagram.represented_visual_model;
            let Some(nested_model) = models.get(nested) else {
                return false;
            };
            nested_cache
                .entry(nested.clone())
                .or_insert_with(|| represented_entities(nested_model, models))
                .contains(concept)
        }
        Some(VisualEntity::Relationship(_) | VisualEntity::ProfileRelationship(_)) | None => false,
    }
}

// ============================================================================
// PASS 2: PROFILE COMPLETENESS
// ============================================================================

#[derive(Default)]
struct ProfilePlan {
    unjustified: Vec<EntityId>,
    missing: Vec<NewVisualProfileRelationship>,
}

fn plan_profiles(model: &VisualModel, entities: &AggregatedEntities) -> ProfilePlan {
    let mut plan = ProfilePlan::default();
    let profiling_of = |represented: &EntityId| -> Option<Vec<EntityId>> {
        match entities.get(represented).map(|wrapper| &wrapper.raw_entity) {
            Some(SemanticEntity::ClassProfile(profile)) => Some(profile.profiling.clone()),
            _ => None,
        }
    };

    // (profile node, profiled entity) pairs already drawn.
    let mut drawn: FxHashSet<(EntityId, EntityId)> = FxHashSet::default();
    for entity in model.entities() {
        let VisualEntity::ProfileRelationship(edge) = entity else {
            continue;
        };
        let source = model.get_visual_entity(&edge.visual_source).and_then(VisualEntity::as_node);
        let target = model.get_visual_entity(&edge.visual_target).and_then(VisualEntity::as_node);
        let justified = match (source, target) {
            (Some(source), Some(target)) => {
                edge.entity == source.represented_entity
                    && profiling_of(&source.represented_entity)
                        .is_some_and(|profiled| profiled.contains(&target.represented_entity))
                    && drawn.insert((source.id.clone(), target.represented_entity.clone()))
            }
            _ => false,
        };
        if !justified {
            trace!(visual = %edge.id, profile = %edge.entity, "profile edge is unjustified");
            plan.unjustified.push(edge.id.clone());
        }
    }

    for node in model.entities().filter_map(VisualEntity::as_node) {
        let Some(profiled) = profiling_of(&node.represented_entity) else {
            continue;
        };
        for target in profiled {
            if drawn.contains(&(node.id.clone(), target.clone())) {
                continue;
            }
            let Some(target_node) = model
                .nodes_for_represented(&target)
                .first()
                .map(|target_node| target_node.id.clone())
            else {
                continue;
            };
            trace!(visual = %node.id, profiled = %target, "synthesizing profile edge");
            drawn.insert((node.id.clone(), target));
            plan.missing.push(NewVisualProfileRelationship {
                entity: node.represented_entity.clone(),
                model: node.model.clone(),
                visual_source: node.id.clone(),
                visual_target: target_node,
                waypoints: Vec::new(),
            });
        }
    }
    plan
}
