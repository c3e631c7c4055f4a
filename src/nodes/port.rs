//! Port types and layout for node connections

use egui::Pos2;

/// Direction of a port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Input,
    Output,
}

/// A named connection point on a node
///
/// Ports are addressed by name; an edge records the port name on each end.
#[derive(Debug, Clone)]
pub struct Port {
    pub name: String,
    pub kind: PortKind,
    /// Canvas-space position, refreshed by `Node::update_port_positions`
    pub position: Pos2,
}

impl Port {
    /// Creates a new port at the origin
    pub fn new(name: impl Into<String>, kind: PortKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Pos2::ZERO,
        }
    }

    /// Checks if this port is an input
    pub fn is_input(&self) -> bool {
        matches!(self.kind, PortKind::Input)
    }

    /// Checks if this port is an output
    pub fn is_output(&self) -> bool {
        matches!(self.kind, PortKind::Output)
    }
}

/// Vertical placement of port `index` out of `count` along a node edge.
///
/// Ports are spaced evenly over the node's height at fraction
/// `(index + 1) / (count + 1)`, so a single port sits at the middle and
/// three ports sit at 1/4, 2/4, 3/4.
pub fn layout_fraction(index: usize, count: usize) -> f32 {
    (index + 1) as f32 / (count + 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_port_centers() {
        assert_eq!(layout_fraction(0, 1), 0.5);
    }

    #[test]
    fn ports_space_evenly() {
        assert_eq!(layout_fraction(0, 3), 0.25);
        assert_eq!(layout_fraction(1, 3), 0.5);
        assert_eq!(layout_fraction(2, 3), 0.75);
    }

    #[test]
    fn port_kind_predicates() {
        assert!(Port::new("data", PortKind::Input).is_input());
        assert!(Port::new("result", PortKind::Output).is_output());
    }
}
