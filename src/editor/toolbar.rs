//! Searchable node palette
//!
//! The toolbar lists every registered node type as a drag source. The
//! drag carries a JSON payload of the form `{"type": ..., "data": ...}`;
//! the canvas parses it on drop and tolerates anything malformed.

use super::PipelineEditor;
use crate::constants::toolbar;
use crate::nodes::NodeRegistry;
use eframe::egui;
use egui::{RichText, Vec2};
use serde_json::json;

impl PipelineEditor {
    pub(super) fn show_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.search_term)
                        .hint_text("Search nodes...")
                        .desired_width(toolbar::SEARCH_WIDTH),
                );
                if !self.search_term.is_empty() && ui.small_button("Clear").clicked() {
                    self.search_term.clear();
                }
            });
            ui.add_space(6.0);

            let needle = self.search_term.to_lowercase();
            ui.horizontal_wrapped(|ui| {
                for def in NodeRegistry::global().definitions() {
                    if !needle.is_empty() && !def.label.to_lowercase().contains(&needle) {
                        continue;
                    }

                    let payload = json!({
                        "type": def.type_id,
                        "data": {
                            "label": def.label,
                            "inputs": def.inputs,
                            "outputs": def.outputs,
                        },
                    })
                    .to_string();

                    let id = egui::Id::new(("palette", def.type_id));
                    ui.dnd_drag_source(id, payload, |ui| {
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.set_min_size(Vec2::from(toolbar::ENTRY_SIZE));
                            ui.horizontal_centered(|ui| {
                                ui.label(RichText::new("\u{25cf}").color(def.accent));
                                ui.label(RichText::new(def.label).size(11.0));
                            });
                        });
                    })
                    .response
                    .on_hover_text(def.description);
                }
            });
            ui.add_space(6.0);
        });
    }
}
