//! A renderer stand-in that applies what it is told.

use indexmap::IndexMap;

use modelsync::base::EntityId;
use modelsync::diagram::{DiagramEdge, DiagramNode, DiagramSink};

#[derive(Debug, Default)]
pub struct Canvas {
    pub nodes: IndexMap<EntityId, DiagramNode>,
    pub edges: IndexMap<EntityId, DiagramEdge>,
    pub replaced: usize,
}

impl DiagramSink for Canvas {
    fn set_content(&mut self, nodes: &[DiagramNode], edges: &[DiagramEdge]) {
        self.replaced += 1;
        self.nodes = nodes.iter().map(|node| (node.id.clone(), node.clone())).collect();
        self.edges = edges.iter().map(|edge| (edge.id.clone(), edge.clone())).collect();
    }

    fn add_nodes(&mut self, nodes: &[DiagramNode]) {
        self.update_nodes(nodes);
    }

    fn update_nodes(&mut self, nodes: &[DiagramNode]) {
        for node in nodes {
            self.nodes.insert(node.id.clone(), node.clone());
        }
    }

    fn remove_nodes(&mut self, ids: &[EntityId]) {
        for id in ids {
            self.nodes.shift_remove(id);
        }
    }

    fn add_edges(&mut self, edges: &[DiagramEdge]) {
        self.update_edges(edges);
    }

    fn update_edges(&mut self, edges: &[DiagramEdge]) {
        for edge in edges {
            self.edges.insert(edge.id.clone(), edge.clone());
        }
    }

    fn remove_edges(&mut self, ids: &[EntityId]) {
        for id in ids {
            self.edges.shift_remove(id);
        }
    }
}
