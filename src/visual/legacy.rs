//! Visual entities as stored by schema v0.
//!
//! The old schema recorded neither the owning semantic source nor the
//! visual endpoints of edges. Such entities are staged on the visual model
//! until migration re-derives the missing facts.

use serde::{Deserialize, Serialize};

use super::entity::Position;
use crate::base::EntityId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyVisualNode {
    #[serde(rename = "identifier")]
    pub id: EntityId,
    pub represented_entity: EntityId,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyVisualRelationship {
    #[serde(rename = "identifier")]
    pub id: EntityId,
    pub represented_relationship: EntityId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LegacyVisualEntity {
    #[serde(rename = "visual-node")]
    Node(LegacyVisualNode),
    #[serde(rename = "visual-relationship")]
    Relationship(LegacyVisualRelationship),
}

impl LegacyVisualEntity {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Node(node) => &node.id,
            Self::Relationship(relationship) => &relationship.id,
        }
    }
}
