//! Incremental delivery to the renderer.

use indexmap::IndexMap;
use tracing::debug;

use super::project::project;
use super::view::{DiagramContent, DiagramEdge, DiagramNode};
use crate::aggregator::Aggregator;
use crate::base::{EntityId, ModelId};

/// The renderer contract.
pub trait DiagramSink {
    /// Replace everything on the canvas.
    fn set_content(&mut self, nodes: &[DiagramNode], edges: &[DiagramEdge]);

    fn add_nodes(&mut self, nodes: &[DiagramNode]);
    fn update_nodes(&mut self, nodes: &[DiagramNode]);
    fn remove_nodes(&mut self, ids: &[EntityId]);

    fn add_edges(&mut self, edges: &[DiagramEdge]);
    fn update_edges(&mut self, edges: &[DiagramEdge]);
    fn remove_edges(&mut self, ids: &[EntityId]);
}

/// Difference between two projections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagramDiff {
    pub added_nodes: Vec<DiagramNode>,
    pub updated_nodes: Vec<DiagramNode>,
    pub removed_nodes: Vec<EntityId>,
    pub added_edges: Vec<DiagramEdge>,
    pub updated_edges: Vec<DiagramEdge>,
    pub removed_edges: Vec<EntityId>,
}

impl DiagramDiff {
    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty()
            && self.updated_nodes.is_empty()
            && self.removed_nodes.is_empty()
            && self.added_edges.is_empty()
            && self.updated_edges.is_empty()
            && self.removed_edges.is_empty()
    }

    /// Apply to a sink. Edges go before the nodes they might end on are
    /// removed, and after the nodes they need are added.
    pub fn apply(&self, sink: &mut dyn DiagramSink) {
        if !self.removed_edges.is_empty() {
            sink.remove_edges(&self.removed_edges);
        }
        if !self.removed_nodes.is_empty() {
            sink.remove_nodes(&self.removed_nodes);
        }
        if !self.added_nodes.is_empty() {
            sink.add_nodes(&self.added_nodes);
        }
        if !self.updated_nodes.is_empty() {
            sink.update_nodes(&self.updated_nodes);
        }
        if !self.added_edges.is_empty() {
            sink.add_edges(&self.added_edges);
        }
        if !self.updated_edges.is_empty() {
            sink.update_edges(&self.updated_edges);
        }
    }
}

/// Compare two projections.
pub fn diff_content(old: &DiagramContent, new: &DiagramContent) -> DiagramDiff {
    let (added_nodes, updated_nodes, removed_nodes) = diff_map(&old.nodes, &new.nodes);
    let (added_edges, updated_edges, removed_edges) = diff_map(&old.edges, &new.edges);
    DiagramDiff {
        added_nodes,
        updated_nodes,
        removed_nodes,
        added_edges,
        updated_edges,
        removed_edges,
    }
}

fn diff_map<T: Clone + PartialEq>(
    old: &IndexMap<EntityId, T>,
    new: &IndexMap<EntityId, T>,
) -> (Vec<T>, Vec<T>, Vec<EntityId>) {
    let mut added = Vec::new();
    let mut updated = Vec::new();
    for (id, item) in new {
        match old.get(id) {
            None => added.push(item.clone()),
            Some(previous) if previous != item => updated.push(item.clone()),
            Some(_) => {}
        }
    }
    let removed = old
        .keys()
        .filter(|id| !new.contains_key(*id))
        .cloned()
        .collect();
    (added, updated, removed)
}

/// Keeps a renderer in step with the aggregator.
///
/// Call [`sync`](Self::sync) from an aggregator subscriber and after
/// visual-only edits (actions, active model switch).
#[derive(Debug, Default)]
pub struct DiagramSync {
    model: Option<ModelId>,
    content: DiagramContent,
}

impl DiagramSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last projection pushed to the sink.
    pub fn content(&self) -> &DiagramContent {
        &self.content
    }

    /// Forget the last projection; the next sync replaces everything.
    pub fn reset(&mut self) {
        self.model = None;
        self.content = DiagramContent::default();
    }

    /// Project the active visual model and push the change to `sink`.
    pub fn sync(&mut self, aggregator: &Aggregator, sink: &mut dyn DiagramSink) -> DiagramDiff {
        let active = aggregator.active_visual_model_id().cloned();
        let content = project(aggregator);

        if active != self.model {
            debug!(
                model = ?active,
                nodes = content.nodes.len(),
                edges = content.edges.len(),
                "active visual model changed, replacing diagram content"
            );
            let nodes: Vec<DiagramNode> = content.nodes.values().cloned().collect();
            let edges: Vec<DiagramEdge> = content.edges.values().cloned().collect();
            sink.set_content(&nodes, &edges);
            let diff = DiagramDiff {
                added_nodes: nodes,
                added_edges: edges,
                removed_nodes: self.content.nodes.keys().cloned().collect(),
                removed_edges: self.content.edges.keys().cloned().collect(),
                ..Default::default()
            };
            self.model = active;
            self.content = content;
            return diff;
        }

        let diff = diff_content(&self.content, &content);
        if !diff.is_empty() {
            debug!(
                added = diff.added_nodes.len() + diff.added_edges.len(),
                updated = diff.updated_nodes.len() + diff.updated_edges.len(),
                removed = diff.removed_nodes.len() + diff.removed_edges.len(),
                "diagram content changed"
            );
            diff.apply(sink);
        }
        self.content = content;
        diff
    }
}
