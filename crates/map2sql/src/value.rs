//! Dynamically-typed document values.
//!
//! A [`Document`] is a plain key/value map. Keys are looked up verbatim, so a
//! flattened document may carry dotted keys such as `"career.company"` next to
//! ordinary ones.

use crate::error::{ConvertError, ConvertResult};
use std::collections::BTreeMap;

/// A document: field name -> value.
pub type Document = BTreeMap<String, Value>;

/// A single document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i32),
    Int64(i64),
    Float(f64),
    Bool(bool),
    String(String),
    /// Embedded document.
    Object(Document),
    /// Arrays have no SQL literal form; the coercer reports and skips them.
    Array(Vec<Value>),
}

impl Value {
    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Int64(_) => "int64",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Value::Object(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Value::Int(small),
                        Err(_) => Value::Int64(i),
                    }
                } else {
                    // u64 above i64::MAX, or a real float.
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Convert a JSON object into a [`Document`].
pub fn document_from_json(json: serde_json::Value) -> ConvertResult<Document> {
    match Value::from(json) {
        Value::Object(doc) => Ok(doc),
        other => Err(ConvertError::config(format!(
            "document must be a JSON object, got {}",
            other.type_name()
        ))),
    }
}
