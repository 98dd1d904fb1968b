//! Projection of the active visual model into renderer view-models.

use smol_str::SmolStr;
use tracing::trace;

use super::view::{
    DiagramAttribute, DiagramContent, DiagramEdge, DiagramNode, EdgeKind, NodeKind,
};
use crate::aggregator::{AggregatedEntities, Aggregator};
use crate::base::{EntityId, LanguageString, ModelId, pick_language};
use crate::semantic::SemanticEntity;
use crate::visual::{VisualEntity, VisualModel};

struct Labels<'a> {
    entities: &'a AggregatedEntities,
    preferred: &'a [SmolStr],
}

impl Labels<'_> {
    fn pick(&self, text: &LanguageString) -> Option<String> {
        pick_language(text, self.preferred)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
    }

    /// Display name of a semantic entity, falling back to its id.
    fn of(&self, id: &EntityId) -> String {
        self.entities
            .get(id)
            .and_then(|wrapper| wrapper.resolved())
            .and_then(SemanticEntity::name)
            .and_then(|name| self.pick(name))
            .unwrap_or_else(|| id.to_string())
    }
}

/// Project the active visual model of `aggregator`.
///
/// Nodes of unresolved entities are left out, and so is every edge that
/// would end on a node left out.
pub fn project(aggregator: &Aggregator) -> DiagramContent {
    let Some(model) = aggregator.active_visual_model() else {
        return DiagramContent::default();
    };
    let config = aggregator.config();
    let entities = aggregator.get_entities();
    let labels = Labels {
        entities,
        preferred: &config.preferred_languages,
    };
    let color = |source: &ModelId| -> SmolStr {
        model
            .get_model_color(source)
            .map(SmolStr::new)
            .unwrap_or_else(|| config.default_model_color.clone())
    };

    let mut content = DiagramContent::default();
    for entity in model.entities() {
        match entity {
            VisualEntity::Node(node) => {
                let Some(resolved) = entities
                    .get(&node.represented_entity)
                    .and_then(|wrapper| wrapper.resolved())
                else {
                    trace!(visual = %node.id, "skipping node of unresolved entity");
                    continue;
                };
                let (kind, profile_of) = match resolved {
                    SemanticEntity::ClassProfile(profile) => (
                        NodeKind::ClassProfile,
                        profile.profiling.iter().map(|id| labels.of(id)).collect(),
                    ),
                    _ => (NodeKind::Class, Vec::new()),
                };
                let attributes = node
                    .content
                    .iter()
                    .filter(|attribute| entities.contains_key(*attribute))
                    .map(|attribute| DiagramAttribute {
                        id: attribute.clone(),
                        label: labels.of(attribute),
                    })
                    .collect();
                content.nodes.insert(
                    node.id.clone(),
                    DiagramNode {
                        id: node.id.clone(),
                        represented: node.represented_entity.clone(),
                        kind,
                        label: labels.of(&node.represented_entity),
                        color: color(&node.model),
                        position: node.position,
                        profile_of,
                        attributes,
                    },
                );
            }
            VisualEntity::DiagramNode(diagram) => {
                let nested = &diagram.represented_visual_model;
                let label = labels
                    .pick(&diagram.label)
                    .or_else(|| {
                        aggregator
                            .visual_model(nested)
                            .map(VisualModel::label)
                            .and_then(|label| labels.pick(label))
                    })
                    .unwrap_or_else(|| nested.to_string());
                content.nodes.insert(
                    diagram.id.clone(),
                    DiagramNode {
                        id: diagram.id.clone(),
                        represented: nested.clone(),
                        kind: NodeKind::Diagram,
                        label,
                        color: config.default_model_color.clone(),
                        position: diagram.position,
                        profile_of: Vec::new(),
                        attributes: Vec::new(),
                    },
                );
            }
            VisualEntity::Relationship(_) | VisualEntity::ProfileRelationship(_) => {}
        }
    }

    for entity in model.entities() {
        let Some((source, target)) = entity.endpoints() else {
            continue;
        };
        if !content.nodes.contains_key(source) || !content.nodes.contains_key(target) {
            trace!(visual = %entity.id(), "skipping edge with a hidden end");
            continue;
        }
        let edge = match entity {
            VisualEntity::Relationship(edge) => {
                let kind = match entities
                    .get(&edge.represented_relationship)
                    .and_then(|wrapper| wrapper.resolved())
                {
                    Some(SemanticEntity::Relationship(_)) => EdgeKind::Relationship,
                    Some(SemanticEntity::RelationshipProfile(_)) => EdgeKind::RelationshipProfile,
                    Some(SemanticEntity::Generalization(_)) => EdgeKind::Generalization,
                    Some(SemanticEntity::Class(_) | SemanticEntity::ClassProfile(_)) | None => {
                        continue;
                    }
                };
                let label = match kind {
                    EdgeKind::Generalization => String::new(),
                    _ => labels.of(&edge.represented_relationship),
                };
                DiagramEdge {
                    id: edge.id.clone(),
                    represented: edge.represented_relationship.clone(),
                    kind,
                    label,
                    color: color(&edge.model),
                    source: edge.visual_source.clone(),
                    target: edge.visual_target.clone(),
                    waypoints: edge.waypoints.clone(),
                }
            }
            VisualEntity::ProfileRelationship(edge) => DiagramEdge {
                id: edge.id.clone(),
                represented: edge.entity.clone(),
                kind: EdgeKind::Profile,
                label: String::new(),
                color: color(&edge.model),
                source: edge.visual_source.clone(),
                target: edge.visual_target.clone(),
                waypoints: edge.waypoints.clone(),
            },
            VisualEntity::Node(_) | VisualEntity::DiagramNode(_) => continue,
        };
        content.edges.insert(edge.id.clone(), edge);
    }
    content
}
