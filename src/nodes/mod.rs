//! Node system - graph model, type registry and field schemas

// Core graph model
pub mod fields;
pub mod graph;
pub mod node;
pub mod port;
pub mod registry;

#[cfg(test)]
mod registry_test;

// Re-export core types
pub use fields::{FieldKind, FieldSpec};
pub use graph::{Edge, PipelineGraph};
pub use node::{Node, NodeId};
pub use port::{Port, PortKind};
pub use registry::{NodeRegistry, NodeTypeDefinition};
