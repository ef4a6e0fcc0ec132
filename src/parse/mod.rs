//! Parse phase: JSON → Rust types + graph construction.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use crate::error::EngineError;

/// Deserialize a workflow JSON string into a `WorkflowSnapshot`.
pub fn parse(json: &str) -> Result<WorkflowSnapshot, Vec<EngineError>> {
    serde_json::from_str::<WorkflowSnapshot>(json).map_err(|e| {
        vec![EngineError::parse(
            "P001",
            format!("Failed to parse workflow JSON: {}", e),
        )]
    })
}
