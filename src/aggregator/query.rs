//! Read-only questions asked of the aggregated entities by the visual
//! layers: what is drawn as a node, what as an edge, what as an attribute.

use super::delta::AggregatedEntities;
use crate::base::EntityId;
use crate::semantic::{
    EndShape, RelationEnds, SemanticEntity, domain_and_range, relation_ends,
};

/// Returns true if `id` aggregates to a class or class profile.
pub fn is_node_concept(entities: &AggregatedEntities, id: &EntityId) -> bool {
    entities
        .get(id)
        .is_some_and(|wrapper| wrapper.raw_entity.kind().is_class_like())
}

/// The concepts an edge for `entity` connects, if it can be drawn.
///
/// Both ends must be node concepts. Attributes (relationships whose range
/// is a datatype) and ambiguous shapes yield `None`.
pub fn drawable_ends(
    entities: &AggregatedEntities,
    entity: &SemanticEntity,
) -> Option<(EntityId, EntityId)> {
    match relation_ends(entity) {
        RelationEnds::Connects { source, target }
            if is_node_concept(entities, &source) && is_node_concept(entities, &target) =>
        {
            Some((source, target))
        }
        _ => None,
    }
}

/// Attributes of `class`: relationships whose domain is `class` and whose
/// range is not a node concept. Returned in aggregation order.
pub fn attributes_of(entities: &AggregatedEntities, class: &EntityId) -> Vec<EntityId> {
    entities
        .values()
        .filter(|wrapper| {
            let Some(resolved) = wrapper.resolved() else {
                return false;
            };
            let ends = match resolved {
                SemanticEntity::Relationship(r) => split(&r.ends),
                SemanticEntity::RelationshipProfile(p) => split(&p.ends),
                _ => None,
            };
            ends.is_some_and(|(domain, range)| {
                domain == Some(class) && !range.is_some_and(|range| is_node_concept(entities, range))
            })
        })
        .map(|wrapper| wrapper.id.clone())
        .collect()
}

fn split<E: EndShape>(ends: &[E]) -> Option<(Option<&EntityId>, Option<&EntityId>)> {
    domain_and_range(ends).map(|split| (split.domain.concept(), split.range.concept()))
}
