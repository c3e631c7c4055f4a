//! Pipeline editor implementation
//!
//! `PipelineEditor` owns the graph and all transient interaction state.
//! Graph mutations requested by node widgets during rendering are queued
//! as `GraphOp`s and applied once the frame's traversal is done; canvas
//! gestures mutate the graph directly inside the input handlers.

pub mod confirm;
mod interaction;
mod rendering;
mod toolbar;

use crate::config::Config;
use crate::nodes::{NodeId, PipelineGraph, PortKind};
use crate::submit::{build_request, AnalyzeClient, AnalyzeSummary};
use crate::theme::Colors;
use confirm::ConfirmState;
use eframe::egui;
use egui::{Pos2, Vec2};
use log::info;
use std::collections::{HashMap, HashSet};

/// A connection gesture in progress: the port it started from
pub(crate) struct PendingConnection {
    pub node: NodeId,
    pub port: String,
    pub kind: PortKind,
}

/// Deferred graph mutation raised by node widgets during rendering.
///
/// These mirror the node shell's three hooks: expand/collapse, delete and
/// field edits.
pub(crate) enum GraphOp {
    ToggleExpand(NodeId),
    DeleteNode(NodeId),
    SetField(NodeId, String, String),
}

/// Main application state for the pipeline editor
pub struct PipelineEditor {
    graph: PipelineGraph,
    colors: Colors,
    config: Config,

    // Canvas state
    pan_offset: Vec2,
    selected_nodes: HashSet<NodeId>,
    drag_offsets: HashMap<NodeId, Vec2>,
    box_selection_start: Option<Pos2>,
    box_selection_end: Option<Pos2>,
    connecting_from: Option<PendingConnection>,
    hovered_edge: Option<String>,
    confirm: ConfirmState,
    pending_ops: Vec<GraphOp>,

    // Toolbar state
    search_term: String,

    // Analysis state
    analyze: AnalyzeClient,
    analyze_outcome: Option<Result<AnalyzeSummary, String>>,
    result_open: bool,
}

impl PipelineEditor {
    pub fn new() -> Self {
        Self {
            graph: PipelineGraph::new(),
            colors: Colors::default(),
            config: Config::load(),
            pan_offset: Vec2::ZERO,
            selected_nodes: HashSet::new(),
            drag_offsets: HashMap::new(),
            box_selection_start: None,
            box_selection_end: None,
            connecting_from: None,
            hovered_edge: None,
            confirm: ConfirmState::default(),
            pending_ops: Vec::new(),
            search_term: String::new(),
            analyze: AnalyzeClient::new(),
            analyze_outcome: None,
            result_open: false,
        }
    }

    /// Canvas-space to screen-space
    pub(crate) fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.pan_offset
    }

    /// Screen-space to canvas-space
    pub(crate) fn to_world(&self, pos: Pos2) -> Pos2 {
        pos - self.pan_offset
    }

    fn submit_pipeline(&mut self) {
        let request = build_request(&self.graph);
        info!(
            "submitting pipeline: {} nodes, {} edges",
            request.nodes.len(),
            request.edges.len()
        );
        self.analyze
            .submit(self.config.analyze_url.clone(), request);
    }

    fn show_submit_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("submit_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                if ui
                    .button(egui::RichText::new("Submit Pipeline").strong())
                    .clicked()
                {
                    self.submit_pipeline();
                }
            });
            ui.add_space(6.0);
        });
    }

    /// Shows the analysis outcome: a summary window on success and a
    /// distinct error window on failure.
    fn show_result_window(&mut self, ctx: &egui::Context) {
        let Some(outcome) = self.analyze_outcome.clone() else {
            return;
        };
        if !self.result_open {
            return;
        }
        let mut open = true;

        match outcome {
            Ok(summary) => {
                egui::Window::new("Pipeline Analysis")
                    .open(&mut open)
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        egui::Grid::new("analysis_summary").num_columns(2).show(ui, |ui| {
                            ui.label("Nodes");
                            ui.strong(summary.num_nodes.to_string());
                            ui.end_row();
                            ui.label("Edges");
                            ui.strong(summary.num_edges.to_string());
                            ui.end_row();
                            ui.label("Directed acyclic graph");
                            ui.strong(summary.dag_label());
                            ui.end_row();
                        });
                    });
            }
            Err(message) => {
                egui::Window::new("Analysis Failed")
                    .open(&mut open)
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.colored_label(self.colors.danger, message);
                        ui.label("The pipeline was not analyzed.");
                    });
            }
        }

        self.result_open = open;
    }

    /// Applies the graph mutations queued during rendering
    fn apply_pending_ops(&mut self) {
        for op in std::mem::take(&mut self.pending_ops) {
            match op {
                GraphOp::ToggleExpand(id) => self.graph.toggle_expand(&id),
                GraphOp::DeleteNode(id) => {
                    self.graph.delete_node(&id);
                    self.selected_nodes.remove(&id);
                }
                GraphOp::SetField(id, field, value) => self.graph.set_field(&id, &field, value),
            }
        }
    }
}

impl Default for PipelineEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for PipelineEditor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keep polling while an analysis may be in flight
        ctx.request_repaint();

        if let Some(result) = self.analyze.poll() {
            self.analyze_outcome = Some(result.map_err(|e| e.to_string()));
            self.result_open = true;
        }

        self.show_toolbar(ctx);
        self.show_submit_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(self.colors.canvas_background))
            .show(ctx, |ui| {
                let response =
                    ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());

                self.graph.update_all_port_positions();
                self.handle_canvas_interaction(ui, &response);

                self.draw_edges(ui, &response);
                self.draw_pending_connection(ui);
                self.draw_box_selection(ui);
                self.draw_nodes(ctx);
                self.draw_ports(ctx, &response);
            });

        self.show_result_window(ctx);
        self.apply_pending_ops();
    }
}
