//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::parse::types::NodeType;

pub mod defaults {
    use crate::parse::types::NodeType;

    pub const STORAGE_KEY: &str = "workflow-editor-config";
    pub const WORKFLOW_NAME: &str = "Sample Workflow";
    pub const WORKFLOW_VERSION: &str = "1.0.0";
    pub const SINGLETON_TYPES: [NodeType; 3] =
        [NodeType::Start, NodeType::End, NodeType::Conditional];
}

/// Knobs the editor may override. Every field has a default, so `{}` is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Node types allowed at most once per workflow.
    pub singleton_types: Vec<NodeType>,
    /// Key of the single storage slot holding the saved snapshot.
    pub storage_key: String,
    pub workflow_name: String,
    pub workflow_version: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            singleton_types: defaults::SINGLETON_TYPES.to_vec(),
            storage_key: defaults::STORAGE_KEY.to_string(),
            workflow_name: defaults::WORKFLOW_NAME.to_string(),
            workflow_version: defaults::WORKFLOW_VERSION.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| {
            EngineError::parse("P002", format!("Failed to parse engine config JSON: {}", e))
        })
    }
}
