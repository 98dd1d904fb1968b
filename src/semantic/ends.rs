//! Which concepts does a relation connect?
//!
//! A relationship has two ends. The end carrying an identifying IRI is the
//! range, the other one the domain; without any IRI the first end is the
//! domain. When both ends carry an IRI the shape is ambiguous and the
//! relationship cannot be drawn.

use super::entity::{RelationshipEnd, RelationshipEndProfile, SemanticEntity};
use crate::base::EntityId;

/// Common accessors over relationship ends and relationship end profiles.
pub trait EndShape {
    fn concept(&self) -> Option<&EntityId>;
    fn iri(&self) -> Option<&str>;

    fn has_iri(&self) -> bool {
        self.iri().is_some_and(|iri| !iri.is_empty())
    }
}

impl EndShape for RelationshipEnd {
    fn concept(&self) -> Option<&EntityId> {
        self.concept.as_ref()
    }

    fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }
}

impl EndShape for RelationshipEndProfile {
    fn concept(&self) -> Option<&EntityId> {
        self.concept.as_ref()
    }

    fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }
}

/// The domain and range ends of a two-ended relationship.
#[derive(Debug)]
pub struct DomainAndRange<'a, E> {
    pub domain: &'a E,
    pub domain_index: usize,
    pub range: &'a E,
    pub range_index: usize,
}

/// Split two ends into domain and range.
///
/// Returns `None` when there are not exactly two ends or when both carry
/// an IRI.
pub fn domain_and_range<E: EndShape>(ends: &[E]) -> Option<DomainAndRange<'_, E>> {
    let [first, second] = ends else {
        return None;
    };
    let (domain_index, range_index) = match (first.has_iri(), second.has_iri()) {
        (true, true) => return None,
        (true, false) => (1, 0),
        (false, _) => (0, 1),
    };
    Some(DomainAndRange {
        domain: &ends[domain_index],
        domain_index,
        range: &ends[range_index],
        range_index,
    })
}

/// The semantic endpoints of an entity drawn as an edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelationEnds {
    /// Edge from the `source` concept to the `target` concept.
    Connects { source: EntityId, target: EntityId },
    /// Both ends carry an identifying IRI.
    Ambiguous,
    /// Not exactly two ends, or an end without a concept.
    Unsupported,
    /// Classes and class profiles are nodes, not edges.
    NotARelation,
}

/// Resolve the concepts an edge for `entity` would connect.
///
/// Relationships and relationship profiles go from domain to range;
/// generalizations go from child to parent. Pass the aggregated entity so
/// that inherited end IRIs and concepts are taken into account.
pub fn relation_ends(entity: &SemanticEntity) -> RelationEnds {
    match entity {
        SemanticEntity::Relationship(r) => ends_of(&r.ends),
        SemanticEntity::RelationshipProfile(p) => ends_of(&p.ends),
        SemanticEntity::Generalization(g) => RelationEnds::Connects {
            source: g.child.clone(),
            target: g.parent.clone(),
        },
        SemanticEntity::Class(_) | SemanticEntity::ClassProfile(_) => RelationEnds::NotARelation,
    }
}

fn ends_of<E: EndShape>(ends: &[E]) -> RelationEnds {
    if ends.len() != 2 {
        return RelationEnds::Unsupported;
    }
    let Some(split) = domain_and_range(ends) else {
        return RelationEnds::Ambiguous;
    };
    match (split.domain.concept(), split.range.concept()) {
        (Some(source), Some(target)) => RelationEnds::Connects {
            source: source.clone(),
            target: target.clone(),
        },
        _ => RelationEnds::Unsupported,
    }
}
