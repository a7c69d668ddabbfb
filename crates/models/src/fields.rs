//! Open-ended field bags with an explicit value vocabulary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language code (`en`, `fr`, ...) to text.
pub type LocalizedText = BTreeMap<String, String>;

/// Free-form values allowed inside `metadata`, rule `conditions` and
/// attribute values: booleans, integers, floats, text and lists of those.
/// JSON `null` and nested objects are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self { Self::Text(v.to_string()) }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self { Self::Text(v) }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self { Self::Integer(v) }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self { Self::Number(v) }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self { Self::Bool(v) }
}

/// Key-value bag (`metadata`, `conditions`).
pub type FieldMap = BTreeMap<String, FieldValue>;

/// References into external systems: system name to identifier.
pub type ExternalRefs = BTreeMap<String, String>;
