//! Centralized theme and styling constants for the Pipeflow editor
//!
//! Single source of truth for the colors used throughout the application,
//! including the per-type accent colors referenced by the node registry.

use egui::Color32;

/// Color palette for the editor surface
pub struct Colors {
    // Background colors
    pub canvas_background: Color32,
    pub node_background: Color32,
    pub node_header: Color32,
    pub node_border: Color32,

    // Selection and highlighting
    pub selection: Color32,
    pub box_select_fill: Color32,
    pub box_select_border: Color32,

    // Port colors
    pub port_input: Color32,
    pub port_output: Color32,
    pub port_hover: Color32,

    // Edge colors
    pub edge_default: Color32,
    pub edge_hover: Color32,
    pub edge_pending: Color32,

    // Delete confirmation
    pub danger: Color32,

    // Text
    pub text_primary: Color32,
    pub text_secondary: Color32,
}

impl Colors {
    pub fn default() -> Self {
        Self {
            canvas_background: Color32::from_rgb(28, 28, 28),
            node_background: Color32::from_rgb(42, 44, 48),
            node_header: Color32::from_rgb(52, 55, 60),
            node_border: Color32::from_rgb(70, 70, 70),

            selection: Color32::from_rgb(255, 200, 100),
            box_select_fill: Color32::from_rgba_unmultiplied(100, 150, 255, 30),
            box_select_border: Color32::from_rgb(100, 150, 255),

            port_input: Color32::from_rgb(100, 150, 100),
            port_output: Color32::from_rgb(150, 100, 100),
            port_hover: Color32::from_rgb(120, 170, 255),

            edge_default: Color32::from_rgb(150, 150, 150),
            edge_hover: Color32::from_rgb(100, 102, 241),
            edge_pending: Color32::from_rgb(255, 255, 100),

            danger: Color32::from_rgb(239, 68, 68),

            text_primary: Color32::from_gray(230),
            text_secondary: Color32::from_gray(160),
        }
    }
}

/// Per-type accent colors shown in node headers and toolbar entries.
///
/// Derived from the original palette of the pipeline node set.
pub mod accent {
    use egui::Color32;

    pub const INPUT: Color32 = Color32::from_rgb(214, 120, 120);
    pub const TEXT: Color32 = Color32::from_rgb(214, 140, 140);
    pub const LLM: Color32 = Color32::from_rgb(110, 190, 140);
    pub const OUTPUT: Color32 = Color32::from_rgb(214, 120, 170);
    pub const MATH: Color32 = Color32::from_rgb(150, 130, 220);
    pub const PROMPT: Color32 = Color32::from_rgb(220, 150, 110);
    pub const IMAGE: Color32 = Color32::from_rgb(120, 190, 120);
    pub const FILTER: Color32 = Color32::from_rgb(220, 180, 110);
    pub const LOGGER: Color32 = Color32::from_rgb(160, 160, 160);
    pub const TRANSLATION: Color32 = Color32::from_rgb(120, 170, 230);
}
