//! # Persistence
//!
//! JSON documents for visual models and semantic sources, keyed by
//! identifier. The `initialSchemaVersion` of a visual model document is the
//! only signal deciding how its entities are read: version 0 entities are
//! staged for migration, current ones are read as full visual entities.
//!
//! ```json
//! {
//!   "identifier": "view",
//!   "initialSchemaVersion": 1,
//!   "modelsData": { "semantic": { "color": "#ff0000" } },
//!   "visualEntities": [
//!     { "type": "visual-node", "identifier": "n1", "representedEntity": "c1", ... }
//!   ]
//! }
//! ```
//!
//! Transport is not handled here; callers hand over bytes or a path.

mod document;
mod error;
mod json;

pub use document::{SemanticModelDocument, VisualModelDocument};
pub use error::PersistenceError;
pub use json::{
    load_semantic_model, load_visual_model, read_semantic_model, read_visual_model,
    save_semantic_model, save_visual_model, write_semantic_model, write_visual_model,
};
