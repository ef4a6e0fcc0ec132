//! Declarative validation schemas over a JSON value bag.
//!
//! A [`Schema`] lists field rules, each an ordered chain of validators for
//! one key, and item rules, which run over every property of every object in
//! an array-valued key. Evaluation never fails: it returns the messages it
//! collected, keyed by field.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

pub type Values = Map<String, Value>;

/// `(value, all_values) -> message`. `value` is `None` when the key is absent.
pub type FieldValidator = Box<dyn Fn(Option<&Value>, &Values) -> Option<String> + Send + Sync>;

/// `(property_name, property_value, item) -> message`.
pub type ItemValidator = Box<dyn Fn(&str, &Value, &Values) -> Option<String> + Send + Sync>;

pub struct SchemaField {
    pub key: String,
    pub validators: Vec<FieldValidator>,
}

pub struct ItemRule {
    /// Key of the array-valued entry whose items are checked.
    pub key: String,
    pub validators: Vec<ItemValidator>,
}

#[derive(Default)]
pub struct Schema {
    pub fields: Vec<SchemaField>,
    pub item_rules: Vec<ItemRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, validators: Vec<FieldValidator>) -> Self {
        self.fields.push(SchemaField {
            key: key.to_string(),
            validators,
        });
        self
    }

    pub fn items(mut self, key: &str, validators: Vec<ItemValidator>) -> Self {
        self.item_rules.push(ItemRule {
            key: key.to_string(),
            validators,
        });
        self
    }
}

/// Error key → message, in the order the errors were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

/// Run `schema` against `values`.
///
/// Field rules stop at the first failing validator. Item rules run every
/// validator against every property of every item and record each message
/// at `"{key}_{item id or index}_{property}"`.
pub fn validate_with_schema(schema: &Schema, values: &Values) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in &schema.fields {
        let value = values.get(&field.key);
        if let Some(message) = field.validators.iter().find_map(|v| v(value, values)) {
            errors.insert(field.key.clone(), message);
        }
    }

    for rule in &schema.item_rules {
        let Some(Value::Array(items)) = values.get(&rule.key) else {
            continue;
        };
        for (idx, item) in items.iter().enumerate() {
            let Value::Object(item) = item else {
                continue;
            };
            let item_key = item_key(item, idx);
            for validate in &rule.validators {
                for (property, value) in item {
                    if let Some(message) = validate(property.as_str(), value, item) {
                        errors.insert(format!("{}_{}_{}", rule.key, item_key, property), message);
                    }
                }
            }
        }
    }

    errors
}

fn item_key(item: &Values, idx: usize) -> String {
    match item.get("id") {
        None | Some(Value::Null) => idx.to_string(),
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Reusable validators
// ---------------------------------------------------------------------------

/// Box a closure as a [`FieldValidator`].
pub fn validator<F>(f: F) -> FieldValidator
where
    F: Fn(Option<&Value>, &Values) -> Option<String> + Send + Sync + 'static,
{
    Box::new(f)
}

/// Box a closure as an [`ItemValidator`].
pub fn item_validator<F>(f: F) -> ItemValidator
where
    F: Fn(&str, &Value, &Values) -> Option<String> + Send + Sync + 'static,
{
    Box::new(f)
}

/// Fails when the value is absent, not a string, or blank after trimming.
pub fn required(message: &'static str) -> FieldValidator {
    validator(move |value, _| {
        if is_blank(value) {
            Some(message.to_string())
        } else {
            None
        }
    })
}

/// Fails when the value is not an array with at least one element.
pub fn non_empty_array(message: &'static str) -> FieldValidator {
    validator(move |value, _| match value {
        Some(Value::Array(items)) if !items.is_empty() => None,
        _ => Some(message.to_string()),
    })
}

/// Fails when the trimmed string value is not one of `allowed`.
pub fn one_of(allowed: &'static [&'static str], message: &'static str) -> FieldValidator {
    validator(move |value, _| match value.and_then(Value::as_str) {
        Some(s) if allowed.contains(&s.trim()) => None,
        _ => Some(message.to_string()),
    })
}

/// Item validator checking a single named property for blankness.
pub fn required_property(property: &'static str, message: &'static str) -> ItemValidator {
    item_validator(move |name, value, _| {
        if name == property && is_blank(Some(value)) {
            Some(message.to_string())
        } else {
            None
        }
    })
}

pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Null) | None => true,
        Some(_) => false,
    }
}
