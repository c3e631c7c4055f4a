//! Canvas drawing: edges, node shells, ports and selection overlays

use super::confirm::ConfirmTarget;
use super::{GraphOp, PipelineEditor};
use crate::constants::{edge, node as node_consts, port};
use crate::nodes::{FieldKind, Node, NodeRegistry, NodeTypeDefinition, PortKind};
use eframe::egui;
use egui::{
    Align2, Color32, CornerRadius, FontId, Pos2, RichText, Shape, Stroke, StrokeKind, Vec2,
};

/// Point on a cubic bezier at parameter `t` (0.0 to 1.0)
pub(crate) fn cubic_bezier_point(t: f32, p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2) -> Pos2 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    Pos2::new(
        mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x,
        mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y,
    )
}

/// Minimum distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let ap = point - a;
    let ab_len_sq = ab.x * ab.x + ab.y * ab.y;

    if ab_len_sq == 0.0 {
        return (point - a).length();
    }

    let t = ((ap.x * ab.x + ap.y * ab.y) / ab_len_sq).clamp(0.0, 1.0);
    let projection = a + ab * t;
    (point - projection).length()
}

/// Control-point offset for an edge between two port positions.
///
/// Edges flow left to right, so the control points push out horizontally;
/// short edges get a minimum offset so they still read as curves.
pub(crate) fn edge_control_offset(from: Pos2, to: Pos2) -> f32 {
    let horizontal_distance = (to.x - from.x).abs();
    if horizontal_distance > 10.0 {
        horizontal_distance * edge::CURVATURE
    } else {
        edge::MIN_CONTROL_OFFSET
    }
}

/// The four bezier control points of an edge
pub(crate) fn edge_bezier_points(from: Pos2, to: Pos2) -> [Pos2; 4] {
    let offset = edge_control_offset(from, to);
    [
        from,
        from + Vec2::new(offset, 0.0),
        to - Vec2::new(offset, 0.0),
        to,
    ]
}

/// Midpoint of an edge curve, where the delete control sits
pub(crate) fn edge_midpoint(points: &[Pos2; 4]) -> Pos2 {
    cubic_bezier_point(0.5, points[0], points[1], points[2], points[3])
}

/// Approximate distance from a point to an edge curve, by sampling
pub(crate) fn distance_to_edge(point: Pos2, points: &[Pos2; 4]) -> f32 {
    let mut min_distance = f32::INFINITY;
    for i in 0..edge::HIT_SEGMENTS {
        let t1 = i as f32 / edge::HIT_SEGMENTS as f32;
        let t2 = (i + 1) as f32 / edge::HIT_SEGMENTS as f32;
        let a = cubic_bezier_point(t1, points[0], points[1], points[2], points[3]);
        let b = cubic_bezier_point(t2, points[0], points[1], points[2], points[3]);
        min_distance = min_distance.min(distance_to_line_segment(point, a, b));
    }
    min_distance
}

fn bezier_shape(points: [Pos2; 4], stroke: Stroke) -> Shape {
    Shape::CubicBezier(egui::epaint::CubicBezierShape {
        points,
        closed: false,
        fill: Color32::TRANSPARENT,
        stroke: stroke.into(),
    })
}

impl PipelineEditor {
    pub(super) fn draw_edges(&self, ui: &egui::Ui, response: &egui::Response) {
        let painter = ui.painter_at(response.rect);

        for e in &self.graph.edges {
            let Some(world_points) = self.edge_points(e) else {
                continue;
            };
            let points = world_points.map(|p| self.to_screen(p));

            let armed = self.confirm.is_armed(&ConfirmTarget::Edge(e.id.clone()));
            let hovered = self.hovered_edge.as_deref() == Some(e.id.as_str());
            let (width, color) = if armed {
                (edge::STROKE_WIDTH_HOVER, self.colors.danger)
            } else if hovered {
                (edge::STROKE_WIDTH_HOVER, self.colors.edge_hover)
            } else {
                (edge::STROKE_WIDTH, self.colors.edge_default)
            };

            painter.add(bezier_shape(points, Stroke::new(width, color)));

            if hovered || armed {
                let center = edge_midpoint(&points);
                let ring = if armed {
                    self.colors.danger
                } else {
                    self.colors.edge_hover
                };
                painter.circle_filled(
                    center,
                    edge::DELETE_BUTTON_RADIUS,
                    self.colors.node_background,
                );
                painter.circle_stroke(
                    center,
                    edge::DELETE_BUTTON_RADIUS,
                    Stroke::new(1.5, ring),
                );
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    "x",
                    FontId::proportional(10.0),
                    ring,
                );
                if armed {
                    painter.text(
                        center - Vec2::new(0.0, edge::DELETE_BUTTON_RADIUS + 4.0),
                        Align2::CENTER_BOTTOM,
                        "Click again to delete",
                        FontId::proportional(10.0),
                        self.colors.text_primary,
                    );
                }
            }
        }
    }

    /// Preview curve from the pending connection's port to the pointer
    pub(super) fn draw_pending_connection(&self, ui: &egui::Ui) {
        let Some(pending) = &self.connecting_from else {
            return;
        };
        let Some(pointer) = ui.input(|i| i.pointer.latest_pos()) else {
            return;
        };
        let Some(n) = self.graph.node(&pending.node) else {
            return;
        };
        let anchor = match pending.kind {
            PortKind::Output => n.outputs.iter().find(|p| p.name == pending.port),
            PortKind::Input => n.inputs.iter().find(|p| p.name == pending.port),
        };
        let Some(anchor) = anchor else {
            return;
        };

        let anchor = self.to_screen(anchor.position);
        let points = match pending.kind {
            PortKind::Output => edge_bezier_points(anchor, pointer),
            PortKind::Input => edge_bezier_points(pointer, anchor),
        };
        ui.painter().add(bezier_shape(
            points,
            Stroke::new(edge::STROKE_WIDTH, self.colors.edge_pending),
        ));
    }

    pub(super) fn draw_box_selection(&self, ui: &egui::Ui) {
        let (Some(start), Some(end)) = (self.box_selection_start, self.box_selection_end) else {
            return;
        };
        let rect = egui::Rect::from_two_pos(self.to_screen(start), self.to_screen(end));
        let painter = ui.painter();
        painter.rect_filled(rect, CornerRadius::ZERO, self.colors.box_select_fill);
        painter.rect_stroke(
            rect,
            CornerRadius::ZERO,
            Stroke::new(1.0, self.colors.box_select_border),
            StrokeKind::Inside,
        );
    }

    /// Renders every node shell in insertion order (z-order)
    pub(super) fn draw_nodes(&mut self, ctx: &egui::Context) {
        let ids: Vec<String> = self.graph.nodes.iter().map(|n| n.id.clone()).collect();
        for id in ids {
            self.draw_node(ctx, &id);
        }
    }

    /// Renders one node shell: header with label, expand/collapse toggle
    /// and two-step delete control, then the field content when expanded.
    ///
    /// The shell works on a snapshot of the node; mutations are queued as
    /// ops and applied after the frame.
    fn draw_node(&mut self, ctx: &egui::Context, id: &str) {
        let Some(n) = self.graph.node(id).cloned() else {
            return;
        };
        // An unregistered type has no renderable shell; skip it.
        let Some(def) = NodeRegistry::global().lookup(&n.type_id) else {
            return;
        };

        let selected = self.selected_nodes.contains(id);
        let armed = self
            .confirm
            .is_armed(&ConfirmTarget::Node(id.to_string()));

        let mut toggle_clicked = false;
        let mut delete_clicked = false;
        let mut field_changes: Vec<(String, String)> = Vec::new();

        let stroke = if selected {
            Stroke::new(2.0, self.colors.selection)
        } else {
            Stroke::new(1.0, self.colors.node_border)
        };

        let area = egui::Area::new(egui::Id::new(("node", id)))
            .fixed_pos(self.to_screen(n.position))
            .show(ctx, |ui| {
                egui::Frame::default()
                    .fill(self.colors.node_background)
                    .stroke(stroke)
                    .corner_radius(CornerRadius::same(node_consts::CORNER_RADIUS as u8))
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_width(node_consts::WIDTH - 16.0);

                        ui.horizontal(|ui| {
                            ui.label(RichText::new(def.label).color(def.accent).strong());
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let delete_label = if armed {
                                        RichText::new("x").color(self.colors.danger).strong()
                                    } else {
                                        RichText::new("x").color(self.colors.text_secondary)
                                    };
                                    let delete = ui.small_button(delete_label).on_hover_text(
                                        if armed {
                                            "Click again to delete"
                                        } else {
                                            "Delete node"
                                        },
                                    );
                                    if delete.clicked() {
                                        delete_clicked = true;
                                    }

                                    let toggle_label = if n.is_expanded { "-" } else { "+" };
                                    if ui
                                        .small_button(toggle_label)
                                        .on_hover_text(if n.is_expanded {
                                            "Collapse"
                                        } else {
                                            "Expand"
                                        })
                                        .clicked()
                                    {
                                        toggle_clicked = true;
                                    }
                                },
                            );
                        });

                        if armed {
                            ui.label(
                                RichText::new("Click again to delete")
                                    .color(self.colors.danger)
                                    .size(10.0),
                            );
                        }

                        if n.is_expanded {
                            ui.label(
                                RichText::new(def.description)
                                    .color(self.colors.text_secondary)
                                    .size(10.5),
                            );
                            ui.separator();
                            self.render_fields(ui, &n, def, &mut field_changes);
                        }
                    });
            });

        // Feed the widget results back into editor state.
        if toggle_clicked {
            self.pending_ops.push(GraphOp::ToggleExpand(id.to_string()));
        }
        if delete_clicked {
            let fired = self.confirm.on_event(super::confirm::ConfirmEvent::Click(
                ConfirmTarget::Node(id.to_string()),
            ));
            if let Some(ConfirmTarget::Node(node_id)) = fired {
                self.pending_ops.push(GraphOp::DeleteNode(node_id));
            }
        }
        for (field, value) in field_changes {
            self.pending_ops
                .push(GraphOp::SetField(id.to_string(), field, value));
        }

        // Sync the measured size so port layout tracks the real extent.
        let measured = area.response.rect.size();
        if let Some(live) = self.graph.node_mut(id) {
            live.size = measured;
        }
    }

    /// Renders the declarative field schema of a node type
    fn render_fields(
        &self,
        ui: &mut egui::Ui,
        n: &Node,
        def: &NodeTypeDefinition,
        changes: &mut Vec<(String, String)>,
    ) {
        for spec in def.fields {
            ui.label(
                RichText::new(spec.label)
                    .size(11.0)
                    .color(self.colors.text_secondary),
            );
            match spec.kind {
                FieldKind::Select(options) => {
                    let current = n.field(spec.key).unwrap_or(spec.default).to_string();
                    egui::ComboBox::from_id_salt((n.id.as_str(), spec.key))
                        .selected_text(spec.display_label(&current))
                        .width(ui.available_width())
                        .show_ui(ui, |ui| {
                            for (value, label) in options {
                                if ui
                                    .selectable_label(current == *value, *label)
                                    .clicked()
                                {
                                    changes.push((spec.key.to_string(), value.to_string()));
                                }
                            }
                        });
                }
                FieldKind::Text { placeholder } => {
                    let mut value = n.field(spec.key).unwrap_or_default().to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut value)
                            .hint_text(placeholder)
                            .desired_width(f32::INFINITY),
                    );
                    if response.changed() {
                        changes.push((spec.key.to_string(), value));
                    }
                }
                FieldKind::TextArea { placeholder } => {
                    let mut value = n.field(spec.key).unwrap_or_default().to_string();
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut value)
                            .hint_text(placeholder)
                            .desired_rows(3)
                            .desired_width(f32::INFINITY),
                    );
                    if response.changed() {
                        changes.push((spec.key.to_string(), value));
                    }
                }
                FieldKind::File => {
                    let current = n.field(spec.key).unwrap_or_default();
                    let file_name = std::path::Path::new(current)
                        .file_name()
                        .map(|f| f.to_string_lossy().into_owned());
                    ui.label(
                        RichText::new(file_name.as_deref().unwrap_or("No file selected"))
                            .size(10.5)
                            .color(self.colors.text_secondary),
                    );
                    if ui.button("Upload...").clicked() {
                        if let Some(path) = rfd::FileDialog::new().pick_file() {
                            changes
                                .push((spec.key.to_string(), path.display().to_string()));
                        }
                    }
                }
            }
            ui.add_space(4.0);
        }
    }

    /// Draws port markers above the node shells, with hover labels
    pub(super) fn draw_ports(&self, ctx: &egui::Context, response: &egui::Response) {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("pipeflow_ports"),
        ));
        let pointer_world = ctx
            .input(|i| i.pointer.latest_pos())
            .filter(|p| response.rect.contains(*p))
            .map(|p| self.to_world(p));

        for n in &self.graph.nodes {
            for p in n.inputs.iter().chain(n.outputs.iter()) {
                let center = self.to_screen(p.position);
                let hovered = pointer_world
                    .is_some_and(|pos| (p.position - pos).length() < port::HIT_RADIUS);

                let fill = if hovered {
                    self.colors.port_hover
                } else if p.is_input() {
                    self.colors.port_input
                } else {
                    self.colors.port_output
                };
                painter.circle_filled(center, port::RADIUS, fill);
                painter.circle_stroke(
                    center,
                    port::RADIUS,
                    Stroke::new(1.0, self.colors.canvas_background),
                );

                if hovered {
                    let (anchor, align) = if p.is_input() {
                        (center - Vec2::new(port::RADIUS + 4.0, 0.0), Align2::RIGHT_CENTER)
                    } else {
                        (center + Vec2::new(port::RADIUS + 4.0, 0.0), Align2::LEFT_CENTER)
                    };
                    painter.text(
                        anchor,
                        align,
                        &p.name,
                        FontId::proportional(10.0),
                        self.colors.text_primary,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_endpoints_match_control_points() {
        let points = edge_bezier_points(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0));
        assert_eq!(
            cubic_bezier_point(0.0, points[0], points[1], points[2], points[3]),
            Pos2::new(0.0, 0.0)
        );
        assert_eq!(
            cubic_bezier_point(1.0, points[0], points[1], points[2], points[3]),
            Pos2::new(100.0, 50.0)
        );
    }

    #[test]
    fn control_points_push_out_horizontally() {
        let points = edge_bezier_points(Pos2::new(0.0, 0.0), Pos2::new(200.0, 0.0));
        assert!(points[1].x > points[0].x);
        assert!(points[2].x < points[3].x);
        assert_eq!(points[1].y, 0.0);
    }

    #[test]
    fn short_edges_keep_a_minimum_curve() {
        let offset = edge_control_offset(Pos2::new(0.0, 0.0), Pos2::new(5.0, 80.0));
        assert_eq!(offset, edge::MIN_CONTROL_OFFSET);
    }

    #[test]
    fn distance_to_segment_handles_projection_and_clamping() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        // Perpendicular projection onto the segment.
        assert_eq!(distance_to_line_segment(Pos2::new(5.0, 3.0), a, b), 3.0);
        // Beyond the end, the distance is to the endpoint.
        assert_eq!(distance_to_line_segment(Pos2::new(13.0, 4.0), a, b), 5.0);
        // Degenerate segment.
        assert_eq!(distance_to_line_segment(Pos2::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn straight_edge_midpoint_sits_between_ports() {
        let points = edge_bezier_points(Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0));
        let mid = edge_midpoint(&points);
        assert_eq!(mid, Pos2::new(50.0, 0.0));
        assert!(distance_to_edge(mid, &points) < 0.5);
    }
}
