//! Aggregated wrappers and the deltas published when they change.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::base::{EntityId, ModelId};
use crate::semantic::SemanticEntity;

/// One identifier as seen through the aggregator.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedEntityWrapper {
    pub id: EntityId,
    /// The source the raw entity was taken from.
    pub source: ModelId,
    pub raw_entity: SemanticEntity,
    /// Profile-resolved snapshot; `None` while resolution fails.
    pub aggregated_entity: Option<SemanticEntity>,
}

impl AggregatedEntityWrapper {
    /// The resolved entity, or nothing when it is unresolved.
    pub fn resolved(&self) -> Option<&SemanticEntity> {
        self.aggregated_entity.as_ref()
    }
}

/// Every aggregated identifier, in first-seen order.
pub type AggregatedEntities = IndexMap<EntityId, AggregatedEntityWrapper>;

/// What changed in one propagation step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregatorDelta {
    pub updated: Vec<AggregatedEntityWrapper>,
    pub removed: Vec<EntityId>,
}

impl AggregatorDelta {
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.removed.is_empty()
    }

    pub fn is_removed(&self, id: &EntityId) -> bool {
        self.removed.contains(id)
    }

    pub fn is_updated(&self, id: &EntityId) -> bool {
        self.updated.iter().any(|wrapper| &wrapper.id == id)
    }
}

/// Identifiers whose snapshot differs between `before` and `after`:
/// added, removed or replaced by a non-equal snapshot.
pub fn touched_ids(
    before: &IndexMap<EntityId, SemanticEntity>,
    after: &IndexMap<EntityId, SemanticEntity>,
) -> Vec<EntityId> {
    let mut seen = FxHashSet::default();
    let mut touched = Vec::new();
    for (id, entity) in after {
        seen.insert(id);
        if before.get(id) != Some(entity) {
            touched.push(id.clone());
        }
    }
    touched.extend(before.keys().filter(|id| !seen.contains(id)).cloned());
    touched
}
