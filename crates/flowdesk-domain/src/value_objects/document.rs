//! Document representation shared by all adapters
//!
//! Records cross the repository boundary as JSON objects. Adapters convert
//! these to their store-native form.

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A stored record, as a JSON object
pub type Document = Map<String, Value>;

/// Serialise a record into a document
///
/// Records must serialise to a JSON object.
pub fn to_document<V: Serialize>(value: &V) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(Error::invalid_argument(format!(
            "records must serialise to an object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Deserialise a record out of a document
pub fn from_document<V: DeserializeOwned>(document: Document) -> Result<V> {
    serde_json::from_value(Value::Object(document)).map_err(|e| {
        Error::serialization_with_source(format!("document does not match record shape: {e}"), e)
    })
}

/// Whether every clause of an equality filter holds for `document`
pub fn matches_filter(filter: &Document, document: &Document) -> bool {
    filter.iter().all(|(field, expected)| {
        document
            .get(field)
            .is_some_and(|actual| values_equal(actual, expected))
    })
}

/// Equality as a document store sees it: numbers compare by value
/// regardless of integer or float representation.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            a.as_f64() == b.as_f64()
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(field, a)| b.get(field).is_some_and(|b| values_equal(a, b)))
        }
        _ => left == right,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
