//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Node geometry constants
pub mod node {
    /// Width of every node body
    pub const WIDTH: f32 = 220.0;

    /// Height of a collapsed node (header only)
    pub const COLLAPSED_HEIGHT: f32 = 56.0;

    /// Fallback height for an expanded node before its first layout pass
    pub const DEFAULT_EXPANDED_HEIGHT: f32 = 140.0;

    /// Corner radius for the node frame
    pub const CORNER_RADIUS: f32 = 6.0;
}

/// Port rendering and hit-testing constants
pub mod port {
    /// Radius of the drawn port marker
    pub const RADIUS: f32 = 5.0;

    /// Pointer distance within which a port accepts clicks and drops
    pub const HIT_RADIUS: f32 = 10.0;
}

/// Edge rendering constants
pub mod edge {
    /// Stroke width of an idle edge
    pub const STROKE_WIDTH: f32 = 2.0;

    /// Stroke width of a hovered or armed edge
    pub const STROKE_WIDTH_HOVER: f32 = 3.0;

    /// Horizontal distance factor for bezier control points
    pub const CURVATURE: f32 = 0.4;

    /// Minimum control-point offset for short edges
    pub const MIN_CONTROL_OFFSET: f32 = 60.0;

    /// Pointer distance within which an edge counts as hovered
    pub const HIT_DISTANCE: f32 = 6.0;

    /// Segments used when sampling a bezier for hit-testing
    pub const HIT_SEGMENTS: usize = 20;

    /// Radius of the midpoint delete control
    pub const DELETE_BUTTON_RADIUS: f32 = 8.0;
}

/// Toolbar constants
pub mod toolbar {
    /// Width of the node search box
    pub const SEARCH_WIDTH: f32 = 160.0;

    /// Size of a draggable palette entry
    pub const ENTRY_SIZE: [f32; 2] = [92.0, 40.0];
}
