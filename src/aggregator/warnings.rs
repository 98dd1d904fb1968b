//! Non-fatal inconsistencies found while aggregating.

use crate::base::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// The profile chain loops; the entity is treated as absent.
    ProfilingCycle,
    /// A profile refers to an identifier no source defines.
    MissingProfiled,
    /// Both relationship ends carry an IRI; domain and range are unknown.
    AmbiguousRelationEnds,
}

/// A warning attached to one aggregated identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub entity: EntityId,
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(entity: EntityId, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            entity,
            kind,
            message: message.into(),
        }
    }
}
