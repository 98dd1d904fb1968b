//! Schema v0 → v1.

use tracing::{debug, trace, warn};

use crate::aggregator::{Aggregator, attributes_of, drawable_ends};
use crate::base::{EntityId, ModelId};
use crate::semantic::{RelationEnds, SemanticEntity, relation_ends};
use crate::visual::{
    LegacyVisualEntity, LegacyVisualNode, LegacyVisualRelationship, SchemaVersion, VisualEntity,
    VisualModel, VisualNode, VisualProfileRelationship, VisualRelationship,
};

/// Outcome of one migration run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Nothing was done because the model is already current.
    pub skipped: bool,
    pub nodes: Vec<EntityId>,
    pub relationships: Vec<EntityId>,
    /// Profile edges synthesized between migrated nodes.
    pub profile_edges: Vec<EntityId>,
    /// Legacy entities dropped as dangling or undrawable.
    pub dropped: Vec<EntityId>,
    /// `modelsData` entries of sources that no longer exist.
    pub pruned_models: Vec<ModelId>,
}

/// Migrate `model` against the current state of `aggregator`.
///
/// Nodes are migrated first, then profile edges are synthesized between
/// them, then relationships are attached to the migrated nodes.
pub fn migrate_visual_model(model: &mut VisualModel, aggregator: &Aggregator) -> MigrationReport {
    if model.initial_schema_version() >= SchemaVersion::CURRENT {
        return MigrationReport {
            skipped: true,
            ..Default::default()
        };
    }

    let mut report = MigrationReport::default();
    let legacy = model.take_legacy();
    let (nodes, relationships): (Vec<_>, Vec<_>) = legacy
        .into_values()
        .partition(|entity| matches!(entity, LegacyVisualEntity::Node(_)));

    for entity in nodes {
        if let LegacyVisualEntity::Node(node) = entity {
            migrate_node(model, aggregator, node, &mut report);
        }
    }
    synthesize_profile_edges(model, aggregator, &mut report);
    for entity in relationships {
        if let LegacyVisualEntity::Relationship(relationship) = entity {
            migrate_relationship(model, aggregator, relationship, &mut report);
        }
    }

    let stale: Vec<ModelId> = model
        .get_models_data()
        .keys()
        .filter(|source| !aggregator.has_source(source))
        .cloned()
        .collect();
    for source in &stale {
        model.models_data_mut().shift_remove(source);
    }
    report.pruned_models = stale;

    model.mark_migrated();
    debug!(
        model = %model.id(),
        nodes = report.nodes.len(),
        relationships = report.relationships.len(),
        profile_edges = report.profile_edges.len(),
        dropped = report.dropped.len(),
        "migrated visual model to current schema"
    );
    report
}

fn migrate_node(
    model: &mut VisualModel,
    aggregator: &Aggregator,
    node: LegacyVisualNode,
    report: &mut MigrationReport,
) {
    let Some(wrapper) = aggregator.entity(&node.represented_entity) else {
        warn!(visual = %node.id, represented = %node.represented_entity, "dropping node for unknown entity");
        report.dropped.push(node.id);
        return;
    };
    if !wrapper.raw_entity.kind().is_class_like() {
        warn!(visual = %node.id, represented = %node.represented_entity, "dropping node for non-class entity");
        report.dropped.push(node.id);
        return;
    }
    trace!(visual = %node.id, source = %wrapper.source, "migrating node");
    let content = attributes_of(aggregator.get_entities(), &node.represented_entity);
    report.nodes.push(node.id.clone());
    model.put(VisualEntity::Node(VisualNode {
        id: node.id,
        model: wrapper.source.clone(),
        represented_entity: node.represented_entity,
        position: node.position,
        content,
        visual_models: Vec::new(),
    }));
}

fn synthesize_profile_edges(
    model: &mut VisualModel,
    aggregator: &Aggregator,
    report: &mut MigrationReport,
) {
    let mut planned = Vec::new();
    for node in model.entities().filter_map(VisualEntity::as_node) {
        if !report.nodes.contains(&node.id) {
            continue;
        }
        let Some(SemanticEntity::ClassProfile(profile)) = aggregator
            .entity(&node.represented_entity)
            .map(|wrapper| &wrapper.raw_entity)
        else {
            continue;
        };
        for profiled in &profile.profiling {
            if let Some(target) = model.nodes_for_represented(profiled).first() {
                planned.push(VisualProfileRelationship {
                    id: EntityId::generate(),
                    entity: profile.id.clone(),
                    model: node.model.clone(),
                    visual_source: node.id.clone(),
                    visual_target: target.id.clone(),
                    waypoints: Vec::new(),
                });
            }
        }
    }
    for edge in planned {
        report.profile_edges.push(edge.id.clone());
        model.put(VisualEntity::ProfileRelationship(edge));
    }
}

fn migrate_relationship(
    model: &mut VisualModel,
    aggregator: &Aggregator,
    relationship: LegacyVisualRelationship,
    report: &mut MigrationReport,
) {
    let represented = &relationship.represented_relationship;
    let Some(wrapper) = aggregator.entity(represented) else {
        warn!(visual = %relationship.id, represented = %represented, "dropping edge for unknown entity");
        report.dropped.push(relationship.id);
        return;
    };
    // Legacy edges carry no endpoints. With ambiguous ends there is nothing
    // to derive them from, so unlike the validator the edge cannot be kept.
    if wrapper.resolved().map(relation_ends) == Some(RelationEnds::Ambiguous) {
        warn!(visual = %relationship.id, represented = %represented, "dropping edge with ambiguous ends");
        report.dropped.push(relationship.id);
        return;
    }
    let ends = wrapper
        .resolved()
        .and_then(|entity| drawable_ends(aggregator.get_entities(), entity));
    let Some((source, target)) = ends else {
        warn!(visual = %relationship.id, represented = %represented, "dropping edge that cannot be drawn");
        report.dropped.push(relationship.id);
        return;
    };
    let visual_source = model.nodes_for_represented(&source).first().map(|n| n.id.clone());
    let visual_target = model.nodes_for_represented(&target).first().map(|n| n.id.clone());
    let (Some(visual_source), Some(visual_target)) = (visual_source, visual_target) else {
        trace!(visual = %relationship.id, "dropping edge with an end outside the view");
        report.dropped.push(relationship.id);
        return;
    };

    report.relationships.push(relationship.id.clone());
    model.put(VisualEntity::Relationship(VisualRelationship {
        id: relationship.id,
        represented_relationship: relationship.represented_relationship,
        model: wrapper.source.clone(),
        visual_source,
        visual_target,
        waypoints: Vec::new(),
    }));
}
