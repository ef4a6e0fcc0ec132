//! Per-node configuration validation.
//!
//! Form and Api nodes carry user-entered configuration checked through
//! [`schema`](super::schema); the other node kinds have nothing to check.

use serde_json::{Value, json};

use super::schema::{
    Schema, ValidationErrors, Values, non_empty_array, one_of, required, required_property,
    validate_with_schema, validator,
};
use crate::parse::types::*;

pub const NODE_NAME_REQUIRED: &str = "Node name is required";
pub const FIELDS_REQUIRED: &str = "At least one field must be configured";
pub const FIELD_NAME_REQUIRED: &str = "Field name is required";
pub const INVALID_HTTP_METHOD: &str = "Invalid HTTP Method";
pub const URL_REQUIRED: &str = "URL is required";
pub const INVALID_URL: &str = "Please enter a valid URL";

const ALLOWED_METHODS: &[&str] = &["POST", "PUT"];

pub fn form_node_schema() -> Schema {
    Schema::new()
        .field("nodeName", vec![required(NODE_NAME_REQUIRED)])
        .field("fields", vec![non_empty_array(FIELDS_REQUIRED)])
        .items("fields", vec![required_property("name", FIELD_NAME_REQUIRED)])
}

pub fn api_node_schema() -> Schema {
    Schema::new()
        .field("nodeName", vec![required(NODE_NAME_REQUIRED)])
        .field("httpMethod", vec![one_of(ALLOWED_METHODS, INVALID_HTTP_METHOD)])
        .field(
            "url",
            vec![
                required(URL_REQUIRED),
                validator(|value, _| match value.and_then(Value::as_str) {
                    Some(url) if !is_valid_url(url) => Some(INVALID_URL.to_string()),
                    _ => None,
                }),
            ],
        )
}

pub fn validate_form_node_config(node_name: &str, fields: &[FormField]) -> ValidationErrors {
    let values = as_values(json!({ "nodeName": node_name, "fields": fields }));
    validate_with_schema(&form_node_schema(), &values)
}

pub fn validate_api_node_config(node_name: &str, http_method: &str, url: &str) -> ValidationErrors {
    let values = as_values(json!({ "nodeName": node_name, "httpMethod": http_method, "url": url }));
    validate_with_schema(&api_node_schema(), &values)
}

/// Validate a single node's config. Node kinds without user config yield no
/// errors.
pub fn validate_node_config(node: &WorkflowNode) -> ValidationErrors {
    match node {
        WorkflowNode::Form(n) => validate_form_node_config(&n.data.label, &n.data.fields),
        WorkflowNode::Api(n) => {
            validate_api_node_config(&n.data.label, n.data.method.as_str(), &n.data.endpoint)
        }
        WorkflowNode::Start(_) | WorkflowNode::End(_) | WorkflowNode::Conditional(_) => {
            ValidationErrors::new()
        }
    }
}

/// An absolute URL with a scheme and a host. Bare hosts such as
/// `www.example.com` do not qualify.
pub fn is_valid_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|u| u.has_host())
}

fn as_values(value: Value) -> Values {
    match value {
        Value::Object(map) => map,
        _ => Values::new(),
    }
}
