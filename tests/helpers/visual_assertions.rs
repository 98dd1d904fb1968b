//! Structural checks over visual models.

use modelsync::aggregator::{Aggregator, is_node_concept};
use modelsync::base::EntityId;
use modelsync::visual::{VisualEntity, VisualModel};

/// Every edge has two node-like endpoints and every node shows an existing
/// class-like entity.
pub fn assert_consistent(aggregator: &Aggregator, model: &VisualModel) {
    let entities = aggregator.get_entities();
    for entity in model.entities() {
        match entity {
            VisualEntity::Node(node) => assert!(
                is_node_concept(entities, &node.represented_entity),
                "node {} shows missing entity {}",
                node.id,
                node.represented_entity
            ),
            VisualEntity::DiagramNode(node) => assert!(
                aggregator
                    .visual_model(&node.represented_visual_model)
                    .is_some(),
                "diagram node {} nests unknown model {}",
                node.id,
                node.represented_visual_model
            ),
            VisualEntity::Relationship(_) | VisualEntity::ProfileRelationship(_) => {
                let (source, target) = entity.endpoints().unwrap();
                for endpoint in [source, target] {
                    assert!(
                        model
                            .get_visual_entity(endpoint)
                            .is_some_and(VisualEntity::is_node_like),
                        "edge {} has dangling endpoint {}",
                        entity.id(),
                        endpoint
                    );
                }
            }
        }
    }
}

pub fn nodes_of(model: &VisualModel, represented: &str) -> Vec<EntityId> {
    model
        .nodes_for_represented(&EntityId::new(represented))
        .into_iter()
        .map(|node| node.id.clone())
        .collect()
}

/// `(source, target)` of every profile edge.
pub fn profile_edges(model: &VisualModel) -> Vec<(EntityId, EntityId)> {
    model
        .entities()
        .filter_map(|entity| match entity {
            VisualEntity::ProfileRelationship(edge) => {
                Some((edge.visual_source.clone(), edge.visual_target.clone()))
            }
            _ => None,
        })
        .collect()
}

/// `(represented, source, target)` of every relationship edge.
pub fn relationship_edges(model: &VisualModel) -> Vec<(EntityId, EntityId, EntityId)> {
    model
        .entities()
        .filter_map(|entity| match entity {
            VisualEntity::Relationship(edge) => Some((
                edge.represented_relationship.clone(),
                edge.visual_source.clone(),
                edge.visual_target.clone(),
            )),
            _ => None,
        })
        .collect()
}
