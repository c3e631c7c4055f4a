//! Pipeline graph data structures and mutation operations

use super::node::{Node, NodeId};
use super::registry::NodeRegistry;
use egui::Pos2;
use log::{debug, warn};
use std::collections::HashMap;
use uuid::Uuid;

/// A directed connection from one node's output port to another node's
/// input port
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub source_port: String,
    pub target: NodeId,
    pub target_port: String,
}

impl Edge {
    /// Creates a new edge with a generated id
    pub fn new(
        source: impl Into<NodeId>,
        source_port: impl Into<String>,
        target: impl Into<NodeId>,
        target_port: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            source_port: source_port.into(),
            target: target.into(),
            target_port: target_port.into(),
        }
    }
}

/// The graph owned by the canvas: nodes in insertion order (which doubles
/// as z-order when rendering) plus the edges between them.
///
/// Every operation is defensive: a missing id or unregistered type
/// degrades to a no-op with a logged diagnostic, and nothing panics past
/// the operation boundary.
#[derive(Debug, Clone, Default)]
pub struct PipelineGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Per-type ordinal counters. Monotonic for the lifetime of the graph,
    /// so a deleted node's id is never handed out again.
    counters: HashMap<String, usize>,
}

impl PipelineGraph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node of the given registered type at `position` and
    /// returns its id. Unregistered types are skipped.
    pub fn create_node(&mut self, type_id: &str, position: Pos2) -> Option<NodeId> {
        let definition = NodeRegistry::global().lookup(type_id)?;

        let counter = self.counters.entry(type_id.to_string()).or_insert(0);
        *counter += 1;
        let ordinal = *counter;
        let id = format!("{}-{}", type_id, ordinal);

        let mut node = Node::new(id.clone(), type_id, position);
        for name in definition.inputs {
            node.add_input(*name);
        }
        for name in definition.outputs {
            node.add_output(*name);
        }
        for spec in definition.fields {
            node.fields
                .insert(spec.key.to_string(), spec.default_for(ordinal));
        }
        node.update_port_positions();

        self.nodes.push(node);
        Some(id)
    }

    /// Looks up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Looks up a node by id, mutably
    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Connects `source.source_port` to `target.target_port`.
    ///
    /// Silently rejects (no edge created) when either node is missing,
    /// `source_port` is not in the source node's current output list, or
    /// `target_port` is not in the target node's current input list.
    /// Returns the new edge id on success.
    pub fn connect(
        &mut self,
        source: &str,
        source_port: &str,
        target: &str,
        target_port: &str,
    ) -> Option<String> {
        let Some(source_node) = self.node(source) else {
            debug!("connect rejected: source node '{}' not found", source);
            return None;
        };
        let Some(target_node) = self.node(target) else {
            debug!("connect rejected: target node '{}' not found", target);
            return None;
        };
        if !source_node.has_output(source_port) {
            debug!(
                "connect rejected: '{}' has no output port '{}'",
                source, source_port
            );
            return None;
        }
        if !target_node.has_input(target_port) {
            debug!(
                "connect rejected: '{}' has no input port '{}'",
                target, target_port
            );
            return None;
        }

        let edge = Edge::new(source, source_port, target, target_port);
        let id = edge.id.clone();
        self.edges.push(edge);
        Some(id)
    }

    /// Removes the edge with the given id; no-op when absent
    pub fn delete_edge(&mut self, edge_id: &str) {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        if self.edges.len() == before {
            debug!("delete_edge: edge '{}' not found", edge_id);
        }
    }

    /// Removes a node and every edge referencing it as source or target.
    ///
    /// Bulk deletion calls this once per node; no dangling edge survives.
    pub fn delete_node(&mut self, node_id: &str) {
        if self.node(node_id).is_none() {
            warn!("delete_node: node '{}' not found", node_id);
            return;
        }
        self.edges
            .retain(|e| e.source != node_id && e.target != node_id);
        self.nodes.retain(|n| n.id != node_id);
    }

    /// Flips `is_expanded` on the addressed node only
    pub fn toggle_expand(&mut self, node_id: &str) {
        match self.node_mut(node_id) {
            Some(node) => node.is_expanded = !node.is_expanded,
            None => warn!("toggle_expand: node '{}' not found", node_id),
        }
    }

    /// Replaces one field value on the addressed node
    pub fn set_field(&mut self, node_id: &str, field: &str, value: String) {
        match self.node_mut(node_id) {
            Some(node) => {
                node.fields.insert(field.to_string(), value);
            }
            None => warn!("set_field: node '{}' not found", node_id),
        }
    }

    /// Refreshes cached port positions on every node
    pub fn update_all_port_positions(&mut self) {
        for node in &mut self.nodes {
            node.update_port_positions();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(types: &[&str]) -> (PipelineGraph, Vec<NodeId>) {
        let mut graph = PipelineGraph::new();
        let ids = types
            .iter()
            .map(|t| graph.create_node(t, Pos2::ZERO).expect("registered type"))
            .collect();
        (graph, ids)
    }

    #[test]
    fn created_node_has_registered_ports() {
        let (graph, ids) = graph_with(&["MathNode"]);
        let node = graph.node(&ids[0]).unwrap();

        assert_eq!(node.inputs.len(), 2);
        assert_eq!(node.outputs.len(), 1);
        assert_eq!(node.inputs[0].name, "value1");
        assert_eq!(node.inputs[1].name, "value2");
        assert_eq!(node.outputs[0].name, "result");
        assert!(node.is_expanded);
        assert_eq!(node.field("operation"), Some("add"));
    }

    #[test]
    fn ids_derive_from_per_type_counters() {
        let (_, ids) = graph_with(&["MathNode", "MathNode", "LoggerNode"]);
        assert_eq!(ids[0], "MathNode-1");
        assert_eq!(ids[1], "MathNode-2");
        assert_eq!(ids[2], "LoggerNode-1");
    }

    #[test]
    fn retired_ids_are_never_reused() {
        let (mut graph, ids) = graph_with(&["MathNode", "MathNode"]);
        graph.delete_node(&ids[0]);

        let fresh = graph.create_node("MathNode", Pos2::ZERO).unwrap();
        assert_eq!(fresh, "MathNode-3");
        assert!(graph.node("MathNode-1").is_none());
    }

    #[test]
    fn unregistered_type_creates_nothing() {
        let mut graph = PipelineGraph::new();
        assert!(graph.create_node("BogusNode", Pos2::ZERO).is_none());
        assert!(graph.nodes.is_empty());
    }

    #[test]
    fn connect_accepts_matching_ports() {
        let (mut graph, ids) = graph_with(&["MathNode", "LoggerNode"]);
        let edge = graph.connect(&ids[0], "result", &ids[1], "data");

        assert!(edge.is_some());
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source_port, "result");
        assert_eq!(graph.edges[0].target_port, "data");
    }

    #[test]
    fn connect_rejects_input_used_as_source() {
        let (mut graph, ids) = graph_with(&["MathNode", "LoggerNode"]);
        // value1 is an input of MathNode, not an output.
        assert!(graph.connect(&ids[0], "value1", &ids[1], "data").is_none());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn connect_rejects_unknown_target_port() {
        let (mut graph, ids) = graph_with(&["MathNode", "LoggerNode"]);
        assert!(graph
            .connect(&ids[0], "result", &ids[1], "nonexistent")
            .is_none());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn connect_rejects_missing_nodes() {
        let (mut graph, ids) = graph_with(&["MathNode"]);
        assert!(graph.connect(&ids[0], "result", "Ghost-1", "data").is_none());
        assert!(graph.connect("Ghost-1", "out", &ids[0], "value1").is_none());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn delete_node_cascades_to_edges() {
        let (mut graph, ids) = graph_with(&["MathNode", "LoggerNode", "OutputNode"]);
        graph.connect(&ids[0], "result", &ids[1], "data").unwrap();
        graph.connect(&ids[1], "logged", &ids[2], "input").unwrap();

        graph.delete_node(&ids[1]);

        assert!(graph.node(&ids[1]).is_none());
        assert!(graph
            .edges
            .iter()
            .all(|e| e.source != ids[1] && e.target != ids[1]));
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn delete_edge_removes_only_that_edge() {
        let (mut graph, ids) = graph_with(&["MathNode", "LoggerNode", "OutputNode"]);
        let first = graph.connect(&ids[0], "result", &ids[1], "data").unwrap();
        graph.connect(&ids[1], "logged", &ids[2], "input").unwrap();

        graph.delete_edge(&first);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].target, ids[2]);

        // Unknown id is a no-op.
        graph.delete_edge("not-an-edge");
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn toggle_expand_is_local_and_involutive() {
        let (mut graph, ids) = graph_with(&["MathNode", "LoggerNode"]);

        graph.toggle_expand(&ids[0]);
        assert!(!graph.node(&ids[0]).unwrap().is_expanded);
        assert!(graph.node(&ids[1]).unwrap().is_expanded);

        graph.toggle_expand(&ids[0]);
        assert!(graph.node(&ids[0]).unwrap().is_expanded);
    }

    #[test]
    fn set_field_replaces_one_value() {
        let (mut graph, ids) = graph_with(&["FilterNode"]);
        graph.set_field(&ids[0], "operation", "regex".to_string());

        let node = graph.node(&ids[0]).unwrap();
        assert_eq!(node.field("operation"), Some("regex"));
        assert_eq!(node.field("condition"), Some(""));

        // Missing node degrades to a no-op.
        graph.set_field("Ghost-1", "operation", "equals".to_string());
    }

    #[test]
    fn instance_defaults_use_allocated_ordinal() {
        let (graph, ids) = graph_with(&["InputNode", "InputNode"]);
        assert_eq!(graph.node(&ids[0]).unwrap().field("inputName"), Some("input_1"));
        assert_eq!(graph.node(&ids[1]).unwrap().field("inputName"), Some("input_2"));
    }
}
