//! Rust types mirroring the editor's workflow JSON.
//!
//! These types are the serde target for snapshots exchanged with the editor
//! and the storage collaborator. Node data is a tagged union on `type`, one
//! record shape per node kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Full `{nodes, edges, metadata}` state of one workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<WorkflowMetadata>,
}

impl WorkflowSnapshot {
    /// A workflow with no nodes, no edges and no metadata.
    pub fn empty() -> Self {
        WorkflowSnapshot {
            nodes: Vec::new(),
            edges: Vec::new(),
            metadata: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    pub name: String,
    pub version: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl WorkflowEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        WorkflowEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

// =============================================================================
// NODE KINDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    Form,
    Conditional,
    Api,
    End,
}

impl NodeType {
    pub const ALL: [NodeType; 5] = [
        NodeType::Start,
        NodeType::Form,
        NodeType::Conditional,
        NodeType::Api,
        NodeType::End,
    ];

    /// Wire name, as used in the node's `type` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Start => "start",
            NodeType::Form => "form",
            NodeType::Conditional => "conditional",
            NodeType::Api => "api",
            NodeType::End => "end",
        }
    }

    /// Human-facing name used in labels and messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeType::Start => "Start",
            NodeType::Form => "Form",
            NodeType::Conditional => "Conditional",
            NodeType::Api => "Api",
            NodeType::End => "End",
        }
    }

    pub fn from_name(name: &str) -> Option<NodeType> {
        NodeType::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Kept absent when the editor never set it, so copies round-trip as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// A copy of a [`FormField`] as seen by a downstream node, tagged with the
/// Form node it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldView {
    #[serde(flatten)]
    pub field: FormField,
    pub node_name: String,
    pub node_id: String,
}

// =============================================================================
// NODE DATA
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelData {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiData {
    pub label: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub endpoint: String,
    /// `None` once the node has been cut off from every upstream node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalData {
    pub label: String,
    /// Condition objects are stored as-is; their semantics belong to the editor.
    #[serde(default)]
    pub conditions: Vec<serde_json::Value>,
}

// =============================================================================
// WORKFLOW NODE: tagged union over the 5 node types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkflowNode {
    Start(NodeBase<LabelData>),
    Form(NodeBase<FormData>),
    Conditional(NodeBase<ConditionalData>),
    Api(NodeBase<ApiData>),
    End(NodeBase<LabelData>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBase<D> {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: D,
}

impl WorkflowNode {
    pub fn id(&self) -> &str {
        match self {
            WorkflowNode::Start(n) => &n.id,
            WorkflowNode::Form(n) => &n.id,
            WorkflowNode::Conditional(n) => &n.id,
            WorkflowNode::Api(n) => &n.id,
            WorkflowNode::End(n) => &n.id,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            WorkflowNode::Start(_) => NodeType::Start,
            WorkflowNode::Form(_) => NodeType::Form,
            WorkflowNode::Conditional(_) => NodeType::Conditional,
            WorkflowNode::Api(_) => NodeType::Api,
            WorkflowNode::End(_) => NodeType::End,
        }
    }

    pub fn is_type(&self, node_type: NodeType) -> bool {
        self.node_type() == node_type
    }
}
