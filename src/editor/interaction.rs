//! Canvas input handling: clicks, drags, connections, drops and keyboard

use super::confirm::{ConfirmEvent, ConfirmTarget};
use super::rendering::{distance_to_edge, edge_bezier_points, edge_midpoint};
use super::{PendingConnection, PipelineEditor};
use crate::constants::{edge, port};
use crate::nodes::{NodeId, PortKind};
use eframe::egui;
use egui::Pos2;
use log::warn;
use serde::Deserialize;

/// Drag payload carried from the toolbar to the canvas.
///
/// Only the type id matters on drop; the definition snapshot is tolerated
/// but unused.
#[derive(Deserialize)]
struct DragPayload {
    #[serde(rename = "type")]
    type_id: String,
}

/// Parses a toolbar drag payload; malformed input is logged and skipped
pub(crate) fn parse_drop_payload(payload: &str) -> Option<String> {
    match serde_json::from_str::<DragPayload>(payload) {
        Ok(parsed) => Some(parsed.type_id),
        Err(err) => {
            warn!("ignoring malformed drag payload: {}", err);
            None
        }
    }
}

impl PipelineEditor {
    pub(super) fn handle_canvas_interaction(&mut self, ui: &egui::Ui, response: &egui::Response) {
        // Middle-drag panning
        if ui.input(|i| i.pointer.middle_down()) && response.dragged() {
            self.pan_offset += response.drag_delta();
        }

        // Node creation by palette drop
        if let Some(payload) = response.dnd_release_payload::<String>() {
            if let Some(pointer) = ui.input(|i| i.pointer.latest_pos()) {
                let pos = self.to_world(pointer);
                self.handle_drop(&payload, pos);
            }
        }

        if let Some(screen_pos) = response.interact_pointer_pos() {
            let pos = self.to_world(screen_pos);
            let is_panning = ui.input(|i| i.pointer.middle_down());

            if !is_panning {
                if response.clicked() {
                    self.handle_click(ui, pos);
                }
                if response.drag_started() {
                    self.handle_drag_start(pos);
                }
                if response.dragged() {
                    self.handle_dragged(pos);
                }
                if response.drag_stopped() {
                    self.handle_drag_stopped(ui, pos);
                }
            }
        }

        self.update_edge_hover(ui, response);
        self.handle_keyboard(ui);
        self.confirm_upkeep(ui);
    }

    /// Creates a node from a toolbar drop; aborts only this drop on a
    /// malformed payload.
    pub(super) fn handle_drop(&mut self, payload: &str, pos: Pos2) {
        if let Some(type_id) = parse_drop_payload(payload) {
            self.graph.create_node(&type_id, pos);
        }
    }

    fn handle_click(&mut self, ui: &egui::Ui, pos: Pos2) {
        // Ports first: a click starts or completes a connection
        if let Some((node_id, port_name, kind)) = self.port_at(pos) {
            self.handle_port_gesture(node_id, port_name, kind);
            self.confirm.on_event(ConfirmEvent::ClickElsewhere);
            return;
        }

        // Midpoint delete control of a hovered or armed edge
        if let Some(edge_id) = self.edge_button_at(pos) {
            let fired = self
                .confirm
                .on_event(ConfirmEvent::Click(ConfirmTarget::Edge(edge_id)));
            if let Some(ConfirmTarget::Edge(id)) = fired {
                self.graph.delete_edge(&id);
                self.hovered_edge = None;
            }
            return;
        }

        // Node body: selection
        if let Some(node_id) = self.node_at(pos) {
            let multi = ui.input(|i| i.modifiers.ctrl || i.modifiers.command);
            if multi {
                if !self.selected_nodes.remove(&node_id) {
                    self.selected_nodes.insert(node_id);
                }
            } else {
                self.selected_nodes.clear();
                self.selected_nodes.insert(node_id);
            }
            self.confirm.on_event(ConfirmEvent::ClickElsewhere);
            return;
        }

        // Empty space: deselect everything and cancel pending work
        self.selected_nodes.clear();
        self.connecting_from = None;
        self.confirm.on_event(ConfirmEvent::ClickElsewhere);
    }

    /// Click-to-connect: the first port click starts a pending connection,
    /// a click on a port of the opposite direction completes it, and any
    /// other port click restarts from that port.
    fn handle_port_gesture(&mut self, node_id: NodeId, port_name: String, kind: PortKind) {
        match self.connecting_from.take() {
            Some(pending) if pending.kind != kind => {
                self.complete_connection(pending, node_id, port_name);
            }
            _ => {
                self.connecting_from = Some(PendingConnection {
                    node: node_id,
                    port: port_name,
                    kind,
                });
            }
        }
    }

    /// Routes a completed gesture into `connect`, orienting output -> input
    fn complete_connection(&mut self, pending: PendingConnection, node_id: NodeId, port_name: String) {
        match pending.kind {
            PortKind::Output => {
                self.graph
                    .connect(&pending.node, &pending.port, &node_id, &port_name);
            }
            PortKind::Input => {
                self.graph
                    .connect(&node_id, &port_name, &pending.node, &pending.port);
            }
        }
    }

    fn handle_drag_start(&mut self, pos: Pos2) {
        // Dragging out of a port starts a connection
        if let Some((node_id, port_name, kind)) = self.port_at(pos) {
            self.connecting_from = Some(PendingConnection {
                node: node_id,
                port: port_name,
                kind,
            });
            return;
        }

        // Dragging a node moves the whole selection when the grabbed node
        // is part of it
        if let Some(node_id) = self.node_at(pos) {
            if !self.selected_nodes.contains(&node_id) {
                self.selected_nodes.clear();
                self.selected_nodes.insert(node_id);
            }
            self.drag_offsets.clear();
            for id in &self.selected_nodes {
                if let Some(node) = self.graph.node(id) {
                    self.drag_offsets.insert(id.clone(), node.position - pos);
                }
            }
            return;
        }

        // Otherwise start box selection
        self.box_selection_start = Some(pos);
        self.box_selection_end = Some(pos);
    }

    fn handle_dragged(&mut self, pos: Pos2) {
        if self.connecting_from.is_some() {
            // Preview curve follows the pointer; nothing to mutate
            return;
        }
        if !self.drag_offsets.is_empty() {
            for (id, offset) in &self.drag_offsets {
                if let Some(node) = self.graph.node_mut(id) {
                    node.position = pos + *offset;
                }
            }
        } else if self.box_selection_start.is_some() {
            self.box_selection_end = Some(pos);
        }
    }

    fn handle_drag_stopped(&mut self, ui: &egui::Ui, pos: Pos2) {
        // Complete a drag-connection when released on a port of the
        // opposite direction; otherwise the pending connection is dropped.
        if let Some(pending) = self.connecting_from.take() {
            if let Some((node_id, port_name, kind)) = self.port_at(pos) {
                if kind != pending.kind {
                    self.complete_connection(pending, node_id, port_name);
                }
            }
        }

        self.drag_offsets.clear();

        if let (Some(start), Some(end)) =
            (self.box_selection_start.take(), self.box_selection_end.take())
        {
            let selection_rect = egui::Rect::from_two_pos(start, end);
            if !ui.input(|i| i.modifiers.ctrl || i.modifiers.command) {
                self.selected_nodes.clear();
            }
            for node in &self.graph.nodes {
                if selection_rect.intersects(node.rect()) {
                    self.selected_nodes.insert(node.id.clone());
                }
            }
        }
    }

    fn handle_keyboard(&mut self, ui: &egui::Ui) {
        // Ignore delete keys while a text field has focus
        let typing = ui.ctx().memory(|m| m.focused().is_some());
        if !typing
            && ui.input(|i| {
                i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)
            })
        {
            let targets: Vec<NodeId> = self.selected_nodes.drain().collect();
            for id in &targets {
                self.graph.delete_node(id);
            }
        }

        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.connecting_from = None;
        }
    }

    /// Recomputes which edge (if any) the pointer is hovering. An edge
    /// under a node is occluded and does not hover.
    fn update_edge_hover(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let pointer = ui.input(|i| i.pointer.latest_pos());
        let Some(pointer) = pointer.filter(|p| response.rect.contains(*p)) else {
            self.hovered_edge = None;
            return;
        };
        let pos = self.to_world(pointer);

        if self.node_at(pos).is_some() {
            self.hovered_edge = None;
            return;
        }

        self.hovered_edge = None;
        for e in &self.graph.edges {
            let Some(points) = self.edge_points(e) else {
                continue;
            };
            let near_curve = distance_to_edge(pos, &points) < edge::HIT_DISTANCE;
            let near_button =
                (edge_midpoint(&points) - pos).length() < edge::DELETE_BUTTON_RADIUS + 2.0;
            if near_curve || near_button {
                self.hovered_edge = Some(e.id.clone());
                break;
            }
        }
    }

    /// Disarms a pending confirmation when its target vanished or, for
    /// nodes, when the pointer left the node's hover region.
    fn confirm_upkeep(&mut self, ui: &egui::Ui) {
        let Some(target) = self.confirm.armed_target().cloned() else {
            return;
        };
        match target {
            ConfirmTarget::Node(id) => {
                let pointer = ui
                    .input(|i| i.pointer.latest_pos())
                    .map(|p| self.to_world(p));
                let still_hovered = match (self.graph.node(&id), pointer) {
                    (Some(node), Some(pos)) => node.rect().expand(port::HIT_RADIUS).contains(pos),
                    _ => false,
                };
                if !still_hovered {
                    self.confirm.on_event(ConfirmEvent::PointerLeft);
                }
            }
            ConfirmTarget::Edge(id) => {
                if !self.graph.edges.iter().any(|e| e.id == id) {
                    self.confirm.on_event(ConfirmEvent::PointerLeft);
                }
            }
        }
    }

    // --- Hit testing -----------------------------------------------------

    /// Topmost port within the hit radius of `pos`
    pub(super) fn port_at(&self, pos: Pos2) -> Option<(NodeId, String, PortKind)> {
        for node in self.graph.nodes.iter().rev() {
            for p in node.outputs.iter().chain(node.inputs.iter()) {
                if (p.position - pos).length() < port::HIT_RADIUS {
                    return Some((node.id.clone(), p.name.clone(), p.kind));
                }
            }
        }
        None
    }

    /// Topmost node whose rect contains `pos`
    pub(super) fn node_at(&self, pos: Pos2) -> Option<NodeId> {
        self.graph
            .nodes
            .iter()
            .rev()
            .find(|n| n.rect().contains(pos))
            .map(|n| n.id.clone())
    }

    /// Visible midpoint delete control containing `pos`, if any
    fn edge_button_at(&self, pos: Pos2) -> Option<String> {
        for e in &self.graph.edges {
            let visible = self.hovered_edge.as_deref() == Some(e.id.as_str())
                || self.confirm.is_armed(&ConfirmTarget::Edge(e.id.clone()));
            if !visible {
                continue;
            }
            let Some(points) = self.edge_points(e) else {
                continue;
            };
            if (edge_midpoint(&points) - pos).length() < edge::DELETE_BUTTON_RADIUS + 2.0 {
                return Some(e.id.clone());
            }
        }
        None
    }

    /// Bezier control points of an edge in canvas space
    pub(super) fn edge_points(&self, edge: &crate::nodes::Edge) -> Option<[Pos2; 4]> {
        let source = self.graph.node(&edge.source)?;
        let target = self.graph.node(&edge.target)?;
        let from = source
            .outputs
            .iter()
            .find(|p| p.name == edge.source_port)?
            .position;
        let to = target
            .inputs
            .iter()
            .find(|p| p.name == edge.target_port)?
            .position;
        Some(edge_bezier_points(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_payload_yields_type_id() {
        let payload = r#"{"type": "MathNode", "data": {"label": "Math Operation"}}"#;
        assert_eq!(parse_drop_payload(payload), Some("MathNode".to_string()));
    }

    #[test]
    fn payload_without_data_is_accepted() {
        assert_eq!(
            parse_drop_payload(r#"{"type": "TextNode"}"#),
            Some("TextNode".to_string())
        );
    }

    #[test]
    fn malformed_payload_is_skipped() {
        assert_eq!(parse_drop_payload("not json"), None);
        assert_eq!(parse_drop_payload("{}"), None);
        assert_eq!(parse_drop_payload(""), None);
    }
}
