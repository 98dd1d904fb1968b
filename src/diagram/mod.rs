//! # Diagram
//!
//! Feeds the renderer. The active visual model and the aggregated entities
//! are projected into plain node and edge view-models; [`DiagramSync`]
//! remembers the last projection and pushes only the difference to a
//! [`DiagramSink`].
//!
//! ```text
//! Aggregator ──project──► DiagramContent ──diff_content──► DiagramDiff ──► DiagramSink
//!                               ▲                                 │
//!                               └────── previous projection ◄─────┘
//! ```
//!
//! Switching the active visual model is not a semantic change, so it
//! publishes no delta; the next [`DiagramSync::sync`] notices the switch and
//! replaces the whole content instead of diffing.

mod project;
mod sync;
mod view;

pub use project::project;
pub use sync::{DiagramDiff, DiagramSink, DiagramSync, diff_content};
pub use view::{DiagramAttribute, DiagramContent, DiagramEdge, DiagramNode, EdgeKind, NodeKind};

#[cfg(test)]
mod tests;
