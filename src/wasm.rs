//! WASM entry points for browser use.
//!
//! Every export takes JSON text and returns a plain JS value. Failures come
//! back as arrays of error objects, never as thrown exceptions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::parse::types::{Position, WorkflowSnapshot};

/// Validate a workflow JSON (`{nodes, edges}`): singletons, node configs,
/// start-to-end path. Returns a JSON array of error objects.
#[wasm_bindgen]
pub fn validate_workflow(json: &str, config_json: Option<String>) -> JsValue {
    let result = validate_workflow_inner(json, config_json.as_deref());
    to_js(&result)
}

fn validate_workflow_inner(json: &str, config_json: Option<&str>) -> Vec<ErrorDto> {
    let config = match load_config(config_json) {
        Ok(c) => c,
        Err(e) => return vec![ErrorDto::from(e)],
    };
    let snapshot = match crate::parse::parse(json) {
        Ok(s) => s,
        Err(errors) => return errors.into_iter().map(ErrorDto::from).collect(),
    };

    crate::workflow::check_workflow(&snapshot.nodes, &snapshot.edges, &config)
        .into_iter()
        .map(ErrorDto::from)
        .collect()
}

/// Validate a single node JSON. Returns the error-key → message map, or an
/// array of parse errors.
#[wasm_bindgen]
pub fn validate_node(node_json: &str) -> JsValue {
    match serde_json::from_str::<crate::parse::types::WorkflowNode>(node_json) {
        Ok(node) => {
            let errors = crate::validate::validate_node_config(&node);
            to_js(&errors)
        }
        Err(e) => {
            let errors = vec![ErrorDto::from(EngineError::parse(
                "P001",
                format!("Failed to parse node JSON: {}", e),
            ))];
            to_js(&errors)
        }
    }
}

/// Form fields visible to `node_id` from its immediate Form predecessors.
#[wasm_bindgen]
pub fn resolve_upstream_fields(node_id: &str, json: &str) -> JsValue {
    match crate::parse::parse(json) {
        Ok(s) => {
            let fields = crate::lineage::resolve_upstream_fields(node_id, &s.nodes, &s.edges);
            to_js(&fields)
        }
        Err(errors) => errors_to_js(errors),
    }
}

/// The workflow's nodes with selections cleared on isolated Api nodes.
#[wasm_bindgen]
pub fn prune_isolated_api_selections(json: &str) -> JsValue {
    match crate::parse::parse(json) {
        Ok(s) => {
            let nodes = crate::lineage::prune_isolated_api_selections(&s.nodes, &s.edges);
            to_js(&nodes)
        }
        Err(errors) => errors_to_js(errors),
    }
}

/// Next node id for a JSON array of nodes, as a string. Only each node's
/// `id` is read, so nodes of unknown shape still count. Input that is not a
/// JSON array counts as an empty workflow.
#[wasm_bindgen]
pub fn allocate_next_node_id(nodes_json: &str) -> String {
    let nodes: Vec<Value> = serde_json::from_str(nodes_json).unwrap_or_default();
    let ids: Vec<String> = nodes
        .iter()
        .filter_map(|node| match node.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
        .collect();
    crate::workflow::next_id_after(ids.iter().map(String::as_str)).to_string()
}

/// A new node object with default data for `node_type`.
#[wasm_bindgen]
pub fn create_node(id: &str, node_type: &str, x: f64, y: f64) -> JsValue {
    let node = crate::workflow::create_node_value(id, node_type, Position { x, y });
    to_js(&node)
}

/// Decode the text held in the editor's storage slot. Missing or unusable
/// contents yield an empty workflow.
#[wasm_bindgen]
pub fn load_snapshot(raw: Option<String>) -> JsValue {
    let snapshot = raw
        .as_deref()
        .and_then(crate::store::decode_snapshot)
        .unwrap_or_else(WorkflowSnapshot::empty);
    to_js(&snapshot)
}

/// Validate a workflow and, when clean, produce the text to write to the
/// storage slot. Returns `{status: "saved", key, payload}` or
/// `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn save_snapshot(json: &str, config_json: Option<String>) -> JsValue {
    let result = save_snapshot_inner(json, config_json.as_deref(), Utc::now());
    to_js(&result)
}

fn save_snapshot_inner(
    json: &str,
    config_json: Option<&str>,
    created: DateTime<Utc>,
) -> SaveResult {
    let config = match load_config(config_json) {
        Ok(c) => c,
        Err(e) => return SaveResult::errors(vec![e]),
    };
    let snapshot = match crate::parse::parse(json) {
        Ok(s) => s,
        Err(errors) => return SaveResult::errors(errors),
    };

    let snapshot = match crate::workflow::checked_snapshot(
        &snapshot.nodes,
        &snapshot.edges,
        &config,
        created,
    ) {
        Ok(s) => s,
        Err(errors) => return SaveResult::errors(errors),
    };
    match serde_json::to_string(&snapshot) {
        Ok(payload) => SaveResult::Saved {
            key: config.storage_key,
            payload,
        },
        Err(e) => SaveResult::errors(vec![EngineError::parse(
            "P003",
            format!("Failed to serialize workflow snapshot: {}", e),
        )]),
    }
}

fn load_config(config_json: Option<&str>) -> Result<EngineConfig, EngineError> {
    match config_json {
        Some(json) => EngineConfig::from_json(json),
        None => Ok(EngineConfig::default()),
    }
}

fn errors_to_js(errors: Vec<EngineError>) -> JsValue {
    let dtos: Vec<ErrorDto> = errors.into_iter().map(ErrorDto::from).collect();
    to_js(&dtos)
}

/// Maps become plain JS objects, so error maps and node data read like JSON.
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    node_id: Option<String>,
}

impl From<EngineError> for ErrorDto {
    fn from(e: EngineError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            node_id: e.node_id,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum SaveResult {
    #[serde(rename = "saved")]
    Saved { key: String, payload: String },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

impl SaveResult {
    fn errors(errors: Vec<EngineError>) -> Self {
        SaveResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        }
    }
}
