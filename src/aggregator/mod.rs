//! # Aggregator
//!
//! Merges any number of entity sources into one addressable space of
//! [`AggregatedEntityWrapper`]s, owns the visual models drawn over that
//! space, and publishes minimal `{updated, removed}` deltas.
//!
//! ```text
//! EntitySource ─┐
//! EntitySource ─┼─► Aggregator ──► AggregatorDelta ──► subscribers
//! EntitySource ─┘       │
//!                       ├── VisualModel (active)
//!                       └── VisualModel ...
//! ```
//!
//! Propagation is synchronous: when a subscriber runs, every source has
//! already been mutated, every aggregated wrapper recomputed, and (with
//! `validate_on_change`) every writable visual model repaired.

mod delta;
mod engine;
mod error;
mod query;
mod view;
mod warnings;

pub use delta::{AggregatedEntities, AggregatedEntityWrapper, AggregatorDelta, touched_ids};
pub use engine::{Aggregator, LoadingReport};
pub use error::AggregatorError;
pub use query::{attributes_of, drawable_ends, is_node_concept};
pub use view::AggregatorView;
pub use warnings::{Warning, WarningKind};
