//! View-models handed to the renderer.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::EntityId;
use crate::visual::{Position, Waypoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    ClassProfile,
    /// A nested visual model.
    Diagram,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Relationship,
    RelationshipProfile,
    Generalization,
    /// From a class profile to what it profiles.
    Profile,
}

/// A visible attribute of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramAttribute {
    pub id: EntityId,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiagramNode {
    /// The visual entity id.
    pub id: EntityId,
    /// Semantic entity, or nested visual model for diagram nodes.
    pub represented: EntityId,
    pub kind: NodeKind,
    pub label: String,
    pub color: SmolStr,
    pub position: Position,
    /// Labels of the profiled entities, for class profiles.
    pub profile_of: Vec<String>,
    pub attributes: Vec<DiagramAttribute>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiagramEdge {
    pub id: EntityId,
    pub represented: EntityId,
    pub kind: EdgeKind,
    pub label: String,
    pub color: SmolStr,
    pub source: EntityId,
    pub target: EntityId,
    pub waypoints: Vec<Waypoint>,
}

/// One full projection, keyed by visual id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagramContent {
    pub nodes: IndexMap<EntityId, DiagramNode>,
    pub edges: IndexMap<EntityId, DiagramEdge>,
}

impl DiagramContent {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
