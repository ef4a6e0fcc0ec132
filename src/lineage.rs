//! Field lineage: which Form fields a node can see from directly upstream.

use std::collections::HashSet;

use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{FormFieldView, WorkflowEdge, WorkflowNode};

/// Fields of the Form nodes with a direct edge into `node_id`.
///
/// Only one hop is followed. Predecessors come in node order, fields in their
/// declared order; non-Form predecessors are skipped.
pub fn resolve_upstream_fields(
    node_id: &str,
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
) -> Vec<FormFieldView> {
    let graph = WorkflowGraph::build(nodes, edges);
    let Some(predecessors) = graph.upstream_ids(node_id) else {
        return vec![];
    };

    nodes
        .iter()
        .filter(|n| predecessors.contains(n.id()))
        .filter_map(|n| match n {
            WorkflowNode::Form(form) => Some(form),
            _ => None,
        })
        .flat_map(|form| {
            form.data.fields.iter().map(|field| FormFieldView {
                field: field.clone(),
                node_name: form.data.label.clone(),
                node_id: form.id.clone(),
            })
        })
        .collect()
}

/// Clear `selectedFields` on every Api node no edge points into. All other
/// nodes are returned as they were.
///
/// Any edge naming the node as its target keeps the selection, even one whose
/// source is not a known node.
pub fn prune_isolated_api_selections(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
) -> Vec<WorkflowNode> {
    let targets: HashSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();

    nodes
        .iter()
        .map(|node| match node {
            WorkflowNode::Api(api) if !targets.contains(api.id.as_str()) => {
                let mut api = api.clone();
                api.data.selected_fields = None;
                WorkflowNode::Api(api)
            }
            other => other.clone(),
        })
        .collect()
}
