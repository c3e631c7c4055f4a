//! Pipeflow - a node-based visual pipeline editor
//!
//! Users drag typed nodes from a toolbar onto a canvas, wire them
//! together with directed edges, edit per-node configuration inline and
//! submit the resulting graph to an analysis endpoint.

pub mod config;
pub mod constants;
pub mod editor;
pub mod nodes;
pub mod submit;
pub mod theme;

pub use editor::PipelineEditor;
pub use nodes::{Edge, Node, NodeRegistry, PipelineGraph};
