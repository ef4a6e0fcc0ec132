//! Workflow validation: node configuration and graph structure.

pub mod node_rules;
pub mod schema;
pub mod structural;

use crate::error::EngineError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{NodeType, WorkflowNode};

pub use node_rules::{
    is_valid_url, validate_api_node_config, validate_form_node_config, validate_node_config,
};
pub use schema::{Schema, ValidationErrors, validate_with_schema};

/// Validate the whole workflow: duplicate singletons, per-node configs, then
/// the start-to-end path.
pub fn validate_graph(
    nodes: &[WorkflowNode],
    graph: &WorkflowGraph,
    singleton_types: &[NodeType],
) -> Vec<EngineError> {
    let mut errors = structural::check_singletons(nodes, singleton_types);

    for node in nodes {
        errors.extend(validate_node(node));
    }

    errors.extend(structural::validate_path(nodes, graph));
    errors
}

/// A node's config errors folded into a single `"Node {id} : ..."` error.
pub fn validate_node(node: &WorkflowNode) -> Option<EngineError> {
    let field_errors = validate_node_config(node);
    if field_errors.is_empty() {
        return None;
    }

    let code = match node.node_type() {
        NodeType::Form => "N001",
        _ => "N002",
    };
    let joined = field_errors.messages().collect::<Vec<_>>().join(", ");
    Some(EngineError::validate(
        code,
        format!("Node {} : {}", node.id(), joined),
        Some(node.id().to_string()),
    ))
}
