//! # Visual layer
//!
//! Diagram-only facts about semantic entities: where a class is drawn,
//! which attributes are visible, how edges are routed, which color a
//! source model gets. Several visual models can exist side by side, and a
//! [`VisualDiagramNode`] lets one visual model appear inside another.
//!
//! ```text
//! VisualModel
//! ├── models_data: IndexMap<ModelId, ModelData>       (per-source color)
//! ├── entities:    IndexMap<EntityId, VisualEntity>   (current schema)
//! └── legacy:      IndexMap<EntityId, LegacyVisualEntity>
//!                  (schema v0 content, invisible until migrated)
//! ```

mod entity;
mod error;
mod legacy;
mod model;
mod nesting;

pub use entity::{
    NewVisualDiagramNode, NewVisualNode, NewVisualProfileRelationship, NewVisualRelationship,
    Position, VisualDiagramNode, VisualEntity, VisualEntityPatch, VisualNode,
    VisualProfileRelationship, VisualRelationship, Waypoint,
};
pub use error::VisualModelError;
pub use legacy::{LegacyVisualEntity, LegacyVisualNode, LegacyVisualRelationship};
pub use model::{ModelData, SchemaVersion, VisualChange, VisualModel};
pub use nesting::represented_entities;
