//! Editor-facing operations: node creation, whole-workflow validation, save.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::config::EngineConfig;
use crate::error::{EngineError, StoreError, messages};
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::*;
use crate::store::{SnapshotStore, Storage};
use crate::validate::{self, structural};

const GENERIC_LABEL: &str = "Node";

// ---------------------------------------------------------------------------
// Node creation
// ---------------------------------------------------------------------------

/// Next free numeric id: one past the largest numeric id, or `0` when no
/// node has one.
pub fn allocate_next_node_id(nodes: &[WorkflowNode]) -> i64 {
    next_id_after(nodes.iter().map(WorkflowNode::id))
}

/// [`allocate_next_node_id`] over bare ids, for node lists that do not all
/// fit the typed model. When the largest id is `i64::MAX` the smallest
/// unused non-negative id is returned instead.
pub fn next_id_after<'a>(ids: impl IntoIterator<Item = &'a str>) -> i64 {
    let taken: HashSet<i64> = ids.into_iter().filter_map(leading_int).collect();
    match taken.iter().max() {
        None => 0,
        Some(&max) => max
            .checked_add(1)
            .unwrap_or_else(|| (0..).find(|n| !taken.contains(n)).unwrap_or(0)),
    }
}

/// Integer prefix of an id, read the way `parseInt` reads it: leading
/// whitespace, an optional sign, then at least one digit.
fn leading_int(id: &str) -> Option<i64> {
    let s = id.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    format!("{}{}", sign, &rest[..digits_len]).parse().ok()
}

/// `"{type} node"` with the wire name, e.g. `"form node"`.
pub fn default_label(node_type: NodeType) -> String {
    format!("{} node", node_type.as_str())
}

/// A fresh node of `node_type` with that type's default data.
pub fn create_node(id: &str, node_type: NodeType, position: Position) -> WorkflowNode {
    let id = id.to_string();
    let label = default_label(node_type);
    match node_type {
        NodeType::Start => WorkflowNode::Start(NodeBase {
            id,
            position,
            data: LabelData { label },
        }),
        NodeType::End => WorkflowNode::End(NodeBase {
            id,
            position,
            data: LabelData { label },
        }),
        NodeType::Form => WorkflowNode::Form(NodeBase {
            id,
            position,
            data: FormData {
                label,
                name: None,
                fields: Vec::new(),
            },
        }),
        NodeType::Conditional => WorkflowNode::Conditional(NodeBase {
            id,
            position,
            data: ConditionalData {
                label,
                conditions: Vec::new(),
            },
        }),
        NodeType::Api => WorkflowNode::Api(NodeBase {
            id,
            position,
            data: ApiData {
                label,
                method: HttpMethod::Post,
                endpoint: String::new(),
                selected_fields: Some(Vec::new()),
            },
        }),
    }
}

/// Create a node with the next free id.
pub fn create_next_node(
    nodes: &[WorkflowNode],
    node_type: NodeType,
    position: Position,
) -> WorkflowNode {
    let id = allocate_next_node_id(nodes).to_string();
    create_node(&id, node_type, position)
}

/// [`create_node`] for a type given by name, as the editor's palette hands
/// it over. Names that are not a known node type get generic data.
pub fn create_node_value(id: &str, type_name: &str, position: Position) -> Value {
    match NodeType::from_name(type_name) {
        Some(node_type) => {
            serde_json::to_value(create_node(id, node_type, position)).unwrap_or(Value::Null)
        }
        None => json!({
            "id": id,
            "type": type_name,
            "position": position,
            "data": { "label": GENERIC_LABEL },
        }),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Every blocking problem in the workflow, with codes and node ids.
pub fn check_workflow(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    config: &EngineConfig,
) -> Vec<EngineError> {
    let graph = WorkflowGraph::build(nodes, edges);
    validate::validate_graph(nodes, &graph, &config.singleton_types)
}

/// Blocking problems as display messages. Empty means the workflow may be
/// saved.
pub fn validate_workflow(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> Vec<String> {
    messages(&check_workflow(nodes, edges, &EngineConfig::default()))
}

/// Start/End presence and reachability only.
pub fn validate_workflow_path(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> Vec<String> {
    let graph = WorkflowGraph::build(nodes, edges);
    messages(&structural::validate_path(nodes, &graph))
}

/// Duplicate-singleton messages for the given singleton types.
pub fn has_more_than_one_invalid(nodes: &[WorkflowNode], singleton_types: &[NodeType]) -> Vec<String> {
    messages(&structural::check_singletons(nodes, singleton_types))
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

/// Assemble the snapshot to persist, refusing workflows with blocking
/// errors.
pub fn build_snapshot(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    config: &EngineConfig,
    created: DateTime<Utc>,
) -> Result<WorkflowSnapshot, StoreError> {
    checked_snapshot(nodes, edges, config, created)
        .map_err(|errors| StoreError::Invalid(messages(&errors)))
}

/// [`build_snapshot`] keeping the coded errors.
pub fn checked_snapshot(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    config: &EngineConfig,
    created: DateTime<Utc>,
) -> Result<WorkflowSnapshot, Vec<EngineError>> {
    let errors = check_workflow(nodes, edges, config);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(snapshot_of(nodes, edges, config, created))
}

/// Snapshot of the workflow with metadata from `config`. Does not validate.
fn snapshot_of(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    config: &EngineConfig,
    created: DateTime<Utc>,
) -> WorkflowSnapshot {
    WorkflowSnapshot {
        nodes: nodes.to_vec(),
        edges: edges.to_vec(),
        metadata: Some(WorkflowMetadata {
            name: config.workflow_name.clone(),
            version: config.workflow_version.clone(),
            created,
        }),
    }
}

/// Validate and persist the workflow, stamped with the current time.
pub fn save_workflow<S: Storage>(
    store: &mut SnapshotStore<S>,
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    config: &EngineConfig,
) -> Result<WorkflowSnapshot, StoreError> {
    let snapshot = build_snapshot(nodes, edges, config, Utc::now())?;
    store.save(&snapshot)?;
    Ok(snapshot)
}
