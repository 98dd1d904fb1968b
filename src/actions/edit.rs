//! Adding to and deleting from views and sources.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::error::ActionError;
use crate::aggregator::{
    AggregatedEntities, Aggregator, AggregatorView, attributes_of, drawable_ends,
};
use crate::base::{EntityId, ModelId};
use crate::semantic::{RelationEnds, SemanticEntity, relation_ends};
use crate::visual::{
    NewVisualNode, NewVisualProfileRelationship, NewVisualRelationship, Position, VisualEntity,
    VisualModel,
};

/// The active visual model, if it accepts writes.
pub(super) fn writable_active(aggregator: &Aggregator) -> Result<&VisualModel, ActionError> {
    let model = aggregator
        .active_visual_model()
        .ok_or(ActionError::NoActiveVisualModel)?;
    if !model.is_writable_visual_model() {
        return Err(ActionError::ReadOnlyVisualModel(model.id().clone()));
    }
    Ok(model)
}

pub(super) fn active_mut<'v>(
    view: &'v mut AggregatorView<'_>,
) -> Result<&'v mut VisualModel, ActionError> {
    view.get_active_visual_model_mut()
        .ok_or(ActionError::NoActiveVisualModel)
}

fn first_node(model: &VisualModel, represented: &EntityId) -> Option<EntityId> {
    model
        .nodes_for_represented(represented)
        .first()
        .map(|node| node.id.clone())
}

// ============================================================================
// ADD NODE
// ============================================================================

/// An edge to create once the new node exists.
enum Neighbour {
    Relationship {
        represented: EntityId,
        model: ModelId,
        /// `None` for a self loop.
        other: Option<EntityId>,
        outgoing: bool,
    },
    Profile {
        profile: EntityId,
        model: ModelId,
        other: EntityId,
        outgoing: bool,
    },
}

/// Draw `entity` on the active visual model at `position`.
///
/// The node lists the entity's attributes, and every edge whose other end
/// is already visible is drawn right away: relationships, generalizations
/// and profile edges in both directions.
pub fn add_node_to_visual_model(
    view: &mut AggregatorView<'_>,
    entity: &EntityId,
    position: Position,
) -> Result<EntityId, ActionError> {
    let aggregator = view.aggregator();
    let model = writable_active(aggregator)?;
    let entities = aggregator.get_entities();
    let wrapper = entities
        .get(entity)
        .ok_or_else(|| ActionError::UnknownEntity(entity.clone()))?;
    let kind = wrapper.raw_entity.kind();
    if !kind.is_class_like() {
        return Err(ActionError::NotANode {
            entity: entity.clone(),
            kind,
        });
    }

    let spec = NewVisualNode {
        represented_entity: entity.clone(),
        model: wrapper.source.clone(),
        position,
        content: attributes_of(entities, entity),
        visual_models: Vec::new(),
    };
    let neighbours = plan_neighbours(model, entities, entity, &wrapper.raw_entity, &wrapper.source);

    let model = active_mut(view)?;
    let node = model.add_visual_node(spec)?;
    let mut edges = 0;
    for neighbour in neighbours {
        match neighbour {
            Neighbour::Relationship {
                represented,
                model: owner,
                other,
                outgoing,
            } => {
                let other = other.unwrap_or_else(|| node.clone());
                let (visual_source, visual_target) = if outgoing {
                    (node.clone(), other)
                } else {
                    (other, node.clone())
                };
                model.add_visual_relationship(NewVisualRelationship {
                    represented_relationship: represented,
                    model: owner,
                    visual_source,
                    visual_target,
                    waypoints: Vec::new(),
                })?;
            }
            Neighbour::Profile {
                profile,
                model: owner,
                other,
                outgoing,
            } => {
                let (visual_source, visual_target) = if outgoing {
                    (node.clone(), other)
                } else {
                    (other, node.clone())
                };
                model.add_visual_profile_relationship(NewVisualProfileRelationship {
                    entity: profile,
                    model: owner,
                    visual_source,
                    visual_target,
                    waypoints: Vec::new(),
                })?;
            }
        }
        edges += 1;
    }
    debug!(visual = %node, represented = %entity, edges, "added node to visual model");
    Ok(node)
}

fn plan_neighbours(
    model: &VisualModel,
    entities: &AggregatedEntities,
    entity: &EntityId,
    raw: &SemanticEntity,
    source: &ModelId,
) -> Vec<Neighbour> {
    let mut neighbours = Vec::new();

    for wrapper in entities.values() {
        let Some((from, to)) = wrapper
            .resolved()
            .and_then(|resolved| drawable_ends(entities, resolved))
        else {
            continue;
        };
        let (other, outgoing) = match (&from == entity, &to == entity) {
            (true, true) => (None, true),
            (true, false) => match first_node(model, &to) {
                Some(other) => (Some(other), true),
                None => continue,
            },
            (false, true) => match first_node(model, &from) {
                Some(other) => (Some(other), false),
                None => continue,
            },
            (false, false) => continue,
        };
        neighbours.push(Neighbour::Relationship {
            represented: wrapper.id.clone(),
            model: wrapper.source.clone(),
            other,
            outgoing,
        });
    }

    if let SemanticEntity::ClassProfile(profile) = raw {
        for profiled in &profile.profiling {
            if let Some(other) = first_node(model, profiled) {
                neighbours.push(Neighbour::Profile {
                    profile: entity.clone(),
                    model: source.clone(),
                    other,
                    outgoing: true,
                });
            }
        }
    }

    for node in model.entities().filter_map(VisualEntity::as_node) {
        let profiles_entity = matches!(
            entities.get(&node.represented_entity).map(|wrapper| &wrapper.raw_entity),
            Some(SemanticEntity::ClassProfile(profile)) if profile.profiling.contains(entity)
        );
        if profiles_entity && !has_profile_edge(model, &node.id, entity) {
            neighbours.push(Neighbour::Profile {
                profile: node.represented_entity.clone(),
                model: node.model.clone(),
                other: node.id.clone(),
                outgoing: false,
            });
        }
    }
    neighbours
}

/// Does `node` already have a profile edge to some node of `profiled`?
fn has_profile_edge(model: &VisualModel, node: &EntityId, profiled: &EntityId) -> bool {
    model.entities().any(|entity| match entity {
        VisualEntity::ProfileRelationship(edge) => {
            &edge.visual_source == node
                && model
                    .get_visual_entity(&edge.visual_target)
                    .and_then(VisualEntity::as_node)
                    .is_some_and(|target| &target.represented_entity == profiled)
        }
        _ => false,
    })
}

// ============================================================================
// ADD RELATION
// ============================================================================

enum PlannedEdge {
    Relationship(NewVisualRelationship),
    Profile(NewVisualProfileRelationship),
}

/// Draw `relation` between the nodes of its ends on the active visual model.
///
/// Relationships go from domain to range, generalizations from child to
/// parent, class profiles from the profile to what it profiles.
pub fn add_relation_to_visual_model(
    view: &mut AggregatorView<'_>,
    relation: &EntityId,
) -> Result<EntityId, ActionError> {
    let aggregator = view.aggregator();
    let model = writable_active(aggregator)?;
    let wrapper = aggregator
        .entity(relation)
        .ok_or_else(|| ActionError::UnknownEntity(relation.clone()))?;
    let resolved = wrapper
        .resolved()
        .ok_or_else(|| ActionError::UnresolvedEntity(relation.clone()))?;

    let planned = match relation_ends(resolved) {
        RelationEnds::Connects { source, target } => {
            let (visual_source, visual_target) =
                (first_node(model, &source), first_node(model, &target));
            match (visual_source, visual_target) {
                (Some(visual_source), Some(visual_target)) => {
                    PlannedEdge::Relationship(NewVisualRelationship {
                        represented_relationship: relation.clone(),
                        model: wrapper.source.clone(),
                        visual_source,
                        visual_target,
                        waypoints: Vec::new(),
                    })
                }
                (visual_source, visual_target) => {
                    let mut missing = Vec::new();
                    if visual_source.is_none() {
                        missing.push(source);
                    }
                    if visual_target.is_none() {
                        missing.push(target);
                    }
                    return Err(ActionError::EndsNotInVisualModel {
                        relation: relation.clone(),
                        missing,
                    });
                }
            }
        }
        RelationEnds::Ambiguous | RelationEnds::Unsupported => {
            return Err(ActionError::UndeterminedDomainRange(relation.clone()));
        }
        RelationEnds::NotARelation => {
            let SemanticEntity::ClassProfile(profile) = &wrapper.raw_entity else {
                return Err(ActionError::NotARelation {
                    entity: relation.clone(),
                    kind: wrapper.raw_entity.kind(),
                });
            };
            let visual_source = first_node(model, relation);
            let visual_target = profile
                .profiling
                .iter()
                .find_map(|profiled| first_node(model, profiled));
            match (visual_source, visual_target) {
                (Some(visual_source), Some(visual_target)) => {
                    PlannedEdge::Profile(NewVisualProfileRelationship {
                        entity: relation.clone(),
                        model: wrapper.source.clone(),
                        visual_source,
                        visual_target,
                        waypoints: Vec::new(),
                    })
                }
                (visual_source, _) => {
                    let mut missing = Vec::new();
                    if visual_source.is_none() {
                        missing.push(relation.clone());
                    }
                    missing.extend(profile.profiling.iter().cloned());
                    return Err(ActionError::EndsNotInVisualModel {
                        relation: relation.clone(),
                        missing,
                    });
                }
            }
        }
    };

    let model = active_mut(view)?;
    let edge = match planned {
        PlannedEdge::Relationship(spec) => model.add_visual_relationship(spec)?,
        PlannedEdge::Profile(spec) => model.add_visual_profile_relationship(spec)?,
    };
    debug!(visual = %edge, represented = %relation, "added edge to visual model");
    Ok(edge)
}

// ============================================================================
// DELETE
// ============================================================================

/// Delete `entity` from the source that owns it.
///
/// Visual models are repaired by the aggregator's propagation, not here.
pub fn delete_from_semantic_model(
    view: &mut AggregatorView<'_>,
    entity: &EntityId,
) -> Result<(), ActionError> {
    let source = view
        .aggregator()
        .owning_source(entity)
        .cloned()
        .ok_or_else(|| ActionError::UnknownEntity(entity.clone()))?;
    view.aggregator_mut()
        .write_source(&source, |writable| writable.delete_entity(entity))?;
    debug!(entity = %entity, source = %source, "deleted entity from source");
    Ok(())
}

/// Remove visual entities from the active visual model, together with the
/// edges attached to removed nodes. Semantic entities are untouched.
pub fn delete_from_visual_model(
    view: &mut AggregatorView<'_>,
    visual: &[EntityId],
) -> Result<Vec<EntityId>, ActionError> {
    let model = writable_active(view.aggregator())?;
    if let Some(unknown) = visual.iter().find(|id| model.get_visual_entity(id).is_none()) {
        return Err(ActionError::UnknownVisualEntity(unknown.clone()));
    }

    let requested: FxHashSet<&EntityId> = visual.iter().collect();
    let mut doomed: Vec<EntityId> = visual.to_vec();
    for entity in model.entities() {
        let Some((source, target)) = entity.endpoints() else {
            continue;
        };
        if (requested.contains(source) || requested.contains(target))
            && !requested.contains(entity.id())
        {
            doomed.push(entity.id().clone());
        }
    }

    let model = active_mut(view)?;
    let removed: Vec<EntityId> = model
        .delete_visual_entities(&doomed)?
        .iter()
        .map(|entity| entity.id().clone())
        .collect();
    debug!(removed = removed.len(), "deleted from visual model");
    Ok(removed)
}
