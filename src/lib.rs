//! # modelsync
//!
//! Visual-semantic synchronization engine for conceptual model editors.
//!
//! Semantic sources hold classes, relationships, generalizations and
//! profiles. Visual models hold the user's views of them. The aggregator
//! merges the sources, resolves profiles and keeps every writable view
//! consistent with the merged semantics.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! actions      → User actions (add node, add relation, delete, surroundings)
//!   ↓
//! diagram      → Projection onto a rendering surface, incremental diffs
//!   ↓
//! validation   → Visual model repair after semantic changes
//! migration    → Upgrade of version 0 visual models
//!   ↓
//! aggregator   → Merged entity view, profile resolution, change deltas
//!   ↓
//! semantic     → Entity snapshots and source contracts
//! visual       → Visual model store
//! persistence  → JSON documents
//!   ↓
//! base         → Primitives (EntityId, LanguageString, EventEmitter)
//! ```

// ============================================================================
// MODULES (dependency order: base → semantic/visual → aggregator → actions)
// ============================================================================

/// Foundation types: identifiers, language strings, event emitter
pub mod base;

/// Engine configuration
pub mod config;

/// Semantic entities, entity sources, profile resolution
pub mod semantic;

/// Visual entities and the visual model store
pub mod visual;

/// Aggregation of semantic sources and the active view cursor
pub mod aggregator;

/// Migration of visual models from schema version 0
pub mod migration;

/// Visual model validation and repair
pub mod validation;

/// Diagram projection and synchronization
pub mod diagram;

/// User-level actions over the aggregator
pub mod actions;

/// JSON documents for semantic and visual models
pub mod persistence;

// Re-export commonly needed items
pub use actions::{ActionError, ActionService};
pub use aggregator::{Aggregator, AggregatorDelta, AggregatorError, AggregatorView};
pub use base::{EntityId, LanguageString, ModelId};
pub use config::EngineConfig;
pub use semantic::{EntitySource, InMemorySemanticModel, SemanticEntity};
pub use visual::{Position, VisualEntity, VisualModel};
