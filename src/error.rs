//! Engine error types.
//!
//! `EngineError` is the coded diagnostic surfaced to the editor; it is never
//! fatal. `StoreError` covers the save path of the storage collaborator.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Validate,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Validate => write!(f, "Validate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub node_id: Option<String>,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.phase, self.code, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for EngineError {}

impl EngineError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        EngineError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        EngineError {
            code: code.into(),
            phase: Phase::Validate,
            message: message.into(),
            node_id,
        }
    }
}

/// Plain messages, in order, as shown to the user.
pub fn messages(errors: &[EngineError]) -> Vec<String> {
    errors.iter().map(|e| e.message.clone()).collect()
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workflow has {} blocking error(s): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),

    #[error("failed to serialize workflow snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage write failed: {0}")]
    Io(#[from] std::io::Error),
}
