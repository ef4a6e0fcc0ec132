//! Graph-level structural validation rules (V001–V004).

use crate::error::EngineError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{NodeType, WorkflowNode};

pub const NO_START_NODE: &str = "No start node found";
pub const NO_END_NODE: &str = "No end node found";

/// Start/End presence (V002, V003) and End-from-Start reachability (V004).
///
/// With several Start or End nodes the first of each, in node order, is used;
/// the duplicates themselves are V001's concern.
pub fn validate_path(nodes: &[WorkflowNode], graph: &WorkflowGraph) -> Vec<EngineError> {
    let mut errors = Vec::new();

    let start = nodes.iter().find(|n| n.is_type(NodeType::Start));
    let end = nodes.iter().find(|n| n.is_type(NodeType::End));

    if start.is_none() {
        errors.push(EngineError::validate("V002", NO_START_NODE, None));
    }
    if end.is_none() {
        errors.push(EngineError::validate("V003", NO_END_NODE, None));
    }
    let (Some(start), Some(end)) = (start, end) else {
        return errors;
    };

    if !graph.is_reachable(start.id(), end.id()) {
        errors.push(EngineError::validate(
            "V004",
            format!(
                "No complete path exists from start node {} to end node {}",
                start.id(),
                end.id()
            ),
            Some(start.id().to_string()),
        ));
    }

    errors
}

/// One error per singleton type that occurs more than once.
pub fn check_singletons(nodes: &[WorkflowNode], singleton_types: &[NodeType]) -> Vec<EngineError> {
    let mut errors = Vec::new();
    v001_singleton_types(nodes, singleton_types, &mut errors);
    errors
}

fn v001_singleton_types(
    nodes: &[WorkflowNode],
    singleton_types: &[NodeType],
    errors: &mut Vec<EngineError>,
) {
    for &node_type in singleton_types {
        let count = nodes.iter().filter(|n| n.is_type(node_type)).count();
        if count > 1 {
            errors.push(EngineError::validate(
                "V001",
                format!(
                    "Cannot have more than one {} Node",
                    node_type.display_name()
                ),
                None,
            ));
        }
    }
}
