//! Visual entity records.

use serde::{Deserialize, Serialize};

use crate::base::{EntityId, LanguageString, ModelId};

/// Node position on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    /// Anchored nodes are left alone by automatic layout.
    #[serde(default)]
    pub anchored: Option<bool>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            anchored: None,
        }
    }
}

/// Intermediate point of an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub anchored: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNode {
    #[serde(rename = "identifier")]
    pub id: EntityId,
    pub represented_entity: EntityId,
    /// Semantic source owning the represented entity.
    pub model: ModelId,
    pub position: Position,
    /// Visible attributes, in display order.
    #[serde(default)]
    pub content: Vec<EntityId>,
    #[serde(default)]
    pub visual_models: Vec<ModelId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualRelationship {
    #[serde(rename = "identifier")]
    pub id: EntityId,
    /// A relationship, relationship profile or generalization.
    pub represented_relationship: EntityId,
    pub model: ModelId,
    pub visual_source: EntityId,
    pub visual_target: EntityId,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// Edge from a class profile node to a node of an entity it profiles.
///
/// Always derived from the semantic model, never authored by the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualProfileRelationship {
    #[serde(rename = "identifier")]
    pub id: EntityId,
    /// The profile entity justifying the edge.
    pub entity: EntityId,
    pub model: ModelId,
    pub visual_source: EntityId,
    pub visual_target: EntityId,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// A node standing in for a whole other visual model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualDiagramNode {
    #[serde(rename = "identifier")]
    pub id: EntityId,
    pub represented_visual_model: ModelId,
    pub position: Position,
    #[serde(default)]
    pub label: LanguageString,
    #[serde(default)]
    pub description: LanguageString,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VisualEntity {
    #[serde(rename = "visual-node")]
    Node(VisualNode),
    #[serde(rename = "visual-relationship")]
    Relationship(VisualRelationship),
    #[serde(rename = "visual-profile-relationship")]
    ProfileRelationship(VisualProfileRelationship),
    #[serde(rename = "visual-diagram-node")]
    DiagramNode(VisualDiagramNode),
}

impl VisualEntity {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Node(node) => &node.id,
            Self::Relationship(edge) => &edge.id,
            Self::ProfileRelationship(edge) => &edge.id,
            Self::DiagramNode(node) => &node.id,
        }
    }

    /// What this entity stands for: a semantic entity, or for diagram nodes
    /// another visual model.
    pub fn represented(&self) -> &EntityId {
        match self {
            Self::Node(node) => &node.represented_entity,
            Self::Relationship(edge) => &edge.represented_relationship,
            Self::ProfileRelationship(edge) => &edge.entity,
            Self::DiagramNode(node) => &node.represented_visual_model,
        }
    }

    /// `(source, target)` visual identifiers for edges.
    pub fn endpoints(&self) -> Option<(&EntityId, &EntityId)> {
        match self {
            Self::Relationship(edge) => Some((&edge.visual_source, &edge.visual_target)),
            Self::ProfileRelationship(edge) => Some((&edge.visual_source, &edge.visual_target)),
            Self::Node(_) | Self::DiagramNode(_) => None,
        }
    }

    pub fn is_node_like(&self) -> bool {
        matches!(self, Self::Node(_) | Self::DiagramNode(_))
    }

    pub fn as_node(&self) -> Option<&VisualNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }
}

// ============================================================================
// WRITE SPECS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct NewVisualNode {
    pub represented_entity: EntityId,
    pub model: ModelId,
    pub position: Position,
    pub content: Vec<EntityId>,
    pub visual_models: Vec<ModelId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewVisualRelationship {
    pub represented_relationship: EntityId,
    pub model: ModelId,
    pub visual_source: EntityId,
    pub visual_target: EntityId,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewVisualProfileRelationship {
    pub entity: EntityId,
    pub model: ModelId,
    pub visual_source: EntityId,
    pub visual_target: EntityId,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewVisualDiagramNode {
    pub represented_visual_model: ModelId,
    pub position: Position,
    pub label: LanguageString,
    pub description: LanguageString,
}

/// Partial update of a visual entity.
///
/// Fields that do not exist on the target variant are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualEntityPatch {
    pub position: Option<Position>,
    pub model: Option<ModelId>,
    pub content: Option<Vec<EntityId>>,
    pub visual_models: Option<Vec<ModelId>>,
    pub visual_source: Option<EntityId>,
    pub visual_target: Option<EntityId>,
    pub waypoints: Option<Vec<Waypoint>>,
    pub label: Option<LanguageString>,
    pub description: Option<LanguageString>,
}

impl VisualEntityPatch {
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn content(content: Vec<EntityId>) -> Self {
        Self {
            content: Some(content),
            ..Default::default()
        }
    }

    pub(super) fn apply(self, entity: &mut VisualEntity) {
        match entity {
            VisualEntity::Node(node) => {
                set(&mut node.position, self.position);
                set(&mut node.model, self.model);
                set(&mut node.content, self.content);
                set(&mut node.visual_models, self.visual_models);
            }
            VisualEntity::Relationship(edge) => {
                set(&mut edge.model, self.model);
                set(&mut edge.visual_source, self.visual_source);
                set(&mut edge.visual_target, self.visual_target);
                set(&mut edge.waypoints, self.waypoints);
            }
            VisualEntity::ProfileRelationship(edge) => {
                set(&mut edge.model, self.model);
                set(&mut edge.visual_source, self.visual_source);
                set(&mut edge.visual_target, self.visual_target);
                set(&mut edge.waypoints, self.waypoints);
            }
            VisualEntity::DiagramNode(node) => {
                set(&mut node.position, self.position);
                set(&mut node.label, self.label);
                set(&mut node.description, self.description);
            }
        }
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
