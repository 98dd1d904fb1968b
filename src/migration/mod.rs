//! # Migration
//!
//! Upgrades visual models persisted by an older schema. Schema v0 stored
//! nodes as `{representedEntity, position}` and edges as
//! `{representedRelationship}`; the owning source and the visual endpoints
//! are re-derived from the aggregator.
//!
//! Migration is gated on [`VisualModel::initial_schema_version`], so running
//! it against its own output is a no-op.
//!
//! [`VisualModel::initial_schema_version`]: crate::visual::VisualModel::initial_schema_version

mod v0;

pub use v0::{MigrationReport, migrate_visual_model};

#[cfg(test)]
mod tests;
