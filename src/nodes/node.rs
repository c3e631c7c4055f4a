//! Node instance types and core node functionality

use super::port::{layout_fraction, Port, PortKind};
use egui::{Pos2, Rect, Vec2};
use std::collections::BTreeMap;

/// Unique identifier for a node, e.g. `"MathNode-2"`
pub type NodeId = String;

/// A placed node in the pipeline graph
///
/// The port lists start out as copies of the type definition but belong to
/// the instance, so they can diverge per node. `fields` is the
/// authoritative copy of the node's configuration; widget state in the
/// editor is only a cache of it.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// Registry key of this node's type
    pub type_id: String,
    pub position: Pos2,
    /// Measured size from the last layout pass; ports are placed against it
    pub size: Vec2,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    pub is_expanded: bool,
    pub fields: BTreeMap<String, String>,
}

impl Node {
    /// Creates a new node with empty port lists
    pub fn new(id: impl Into<NodeId>, type_id: impl Into<String>, position: Pos2) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            position,
            size: Vec2::new(
                crate::constants::node::WIDTH,
                crate::constants::node::DEFAULT_EXPANDED_HEIGHT,
            ),
            inputs: vec![],
            outputs: vec![],
            is_expanded: true,
            fields: BTreeMap::new(),
        }
    }

    /// Adds an input port to the node
    pub fn add_input(&mut self, name: impl Into<String>) -> &mut Self {
        self.inputs.push(Port::new(name, PortKind::Input));
        self
    }

    /// Adds an output port to the node
    pub fn add_output(&mut self, name: impl Into<String>) -> &mut Self {
        self.outputs.push(Port::new(name, PortKind::Output));
        self
    }

    /// Updates the positions of all ports based on the node's rect.
    ///
    /// Inputs run down the left edge and outputs down the right edge, each
    /// list spaced independently at `(index + 1) / (count + 1)` of the
    /// node's height. Collapsing a node shrinks its height but the ports
    /// stay addressable against the collapsed extent.
    pub fn update_port_positions(&mut self) {
        let height = self.size.y;
        let left = self.position.x;
        let right = self.position.x + self.size.x;
        let top = self.position.y;

        let input_count = self.inputs.len();
        for (i, input) in self.inputs.iter_mut().enumerate() {
            input.position = Pos2::new(left, top + height * layout_fraction(i, input_count));
        }

        let output_count = self.outputs.len();
        for (i, output) in self.outputs.iter_mut().enumerate() {
            output.position = Pos2::new(right, top + height * layout_fraction(i, output_count));
        }
    }

    /// Returns the bounding rectangle of the node
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Current value of a field, if set
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// True when `name` is one of this node's output ports
    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.iter().any(|p| p.name == name)
    }

    /// True when `name` is one of this node's input ports
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn math_node() -> Node {
        let mut node = Node::new("MathNode-1", "MathNode", Pos2::new(100.0, 50.0));
        node.add_input("value1").add_input("value2");
        node.add_output("result");
        node.size = Vec2::new(220.0, 200.0);
        node
    }

    #[test]
    fn inputs_lay_out_along_left_edge() {
        let mut node = math_node();
        node.update_port_positions();

        // Two inputs at 1/3 and 2/3 of the height on the left edge.
        assert_eq!(node.inputs[0].position.x, 100.0);
        assert_eq!(node.inputs[1].position.x, 100.0);
        assert!((node.inputs[0].position.y - (50.0 + 200.0 / 3.0)).abs() < 0.01);
        assert!((node.inputs[1].position.y - (50.0 + 400.0 / 3.0)).abs() < 0.01);
    }

    #[test]
    fn single_output_centers_on_right_edge() {
        let mut node = math_node();
        node.update_port_positions();

        assert_eq!(node.outputs[0].position.x, 320.0);
        assert_eq!(node.outputs[0].position.y, 150.0);
    }

    #[test]
    fn collapsed_node_keeps_ports_addressable() {
        let mut node = math_node();
        node.is_expanded = false;
        node.size.y = crate::constants::node::COLLAPSED_HEIGHT;
        node.update_port_positions();

        assert!(node.has_input("value1"));
        assert!(node.has_output("result"));
        // Ports follow the collapsed extent.
        assert!(node.inputs[1].position.y < 50.0 + crate::constants::node::COLLAPSED_HEIGHT);
    }

    #[test]
    fn port_membership_checks_use_current_lists() {
        let node = math_node();
        assert!(node.has_output("result"));
        assert!(!node.has_output("value1"));
        assert!(node.has_input("value2"));
        assert!(!node.has_input("result"));
    }
}
