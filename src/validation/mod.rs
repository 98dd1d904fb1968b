//! # Validation
//!
//! Repairs a visual model whose cached facts drifted from the aggregated
//! semantic state. Two passes run in order:
//!
//! 1. **Edges and nodes**: nodes of vanished entities, edges whose
//!    represented relationship no longer connects what their endpoints
//!    show, and profile edges touching a diagram node are collected and
//!    removed in one batched call. Visible attributes that vanished are
//!    dropped from node content.
//! 2. **Profile completeness**: every class profile node gets a profile
//!    edge to a node of each entity it profiles; profile edges without a
//!    semantic justification are removed.
//!
//! A second run right after a first one changes nothing.

mod repair;

pub use repair::{ValidationReport, validate_visual_model};
