//! Record keys and key schemas

use crate::error::{Error, Result};
use crate::value_objects::document::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key tuple identifying a record
///
/// Holds the primary key value and, for composite-key schemes, the secondary
/// key value. Serialises as a one- or two-element array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Value>", try_from = "Vec<Value>")]
pub struct Key {
    primary: Value,
    secondary: Option<Value>,
}

impl Key {
    /// Key made of the primary field only
    pub fn new<P: Into<Value>>(primary: P) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
        }
    }

    /// Composite key made of the primary and secondary fields
    pub fn composite<P: Into<Value>, S: Into<Value>>(primary: P, secondary: S) -> Self {
        Self {
            primary: primary.into(),
            secondary: Some(secondary.into()),
        }
    }

    /// Primary key value
    pub fn primary(&self) -> &Value {
        &self.primary
    }

    /// Secondary key value, if any
    pub fn secondary(&self) -> Option<&Value> {
        self.secondary.as_ref()
    }

    /// Key values in tuple order
    pub fn parts(&self) -> Vec<&Value> {
        std::iter::once(&self.primary)
            .chain(self.secondary.as_ref())
            .collect()
    }
}

impl From<Key> for Vec<Value> {
    fn from(key: Key) -> Self {
        let mut parts = vec![key.primary];
        parts.extend(key.secondary);
        parts
    }
}

impl TryFrom<Vec<Value>> for Key {
    type Error = String;

    fn try_from(parts: Vec<Value>) -> std::result::Result<Self, Self::Error> {
        let mut parts = parts.into_iter();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(primary), secondary, None) => Ok(Self { primary, secondary }),
            _ => Err("a key holds one or two values".to_string()),
        }
    }
}

/// Names of the key fields a repository handle is bound to
///
/// Fixed at construction; no operation can change it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchema {
    primary: String,
    secondary: Option<String>,
}

impl KeySchema {
    /// Schema keyed by a single field
    pub fn new<S: Into<String>>(primary: S) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
        }
    }

    /// Schema keyed by a primary and a secondary field
    pub fn composite<P: Into<String>, S: Into<String>>(primary: P, secondary: S) -> Self {
        Self {
            primary: primary.into(),
            secondary: Some(secondary.into()),
        }
    }

    /// Schema declared by a [`Record`](crate::ports::Record) type
    pub fn for_record<R: crate::ports::Record>() -> Self {
        Self {
            primary: R::PRIMARY_KEY.to_string(),
            secondary: R::SECONDARY_KEY.map(str::to_string),
        }
    }

    /// Primary key field name
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Secondary key field name, if the schema is composite
    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    /// Equality filter selecting the record identified by `key`
    ///
    /// The secondary clause is present only when this schema has a secondary
    /// field and the key carries a secondary value. Clauses are ANDed.
    pub fn filter_for(&self, key: &Key) -> Document {
        let mut filter = Document::new();
        filter.insert(self.primary.clone(), key.primary.clone());
        if let (Some(field), Some(value)) = (&self.secondary, &key.secondary) {
            filter.insert(field.clone(), value.clone());
        }
        filter
    }

    /// One filter per key, to be combined with a logical OR
    pub fn filters_for(&self, keys: &[Key]) -> Vec<Document> {
        keys.iter().map(|key| self.filter_for(key)).collect()
    }

    /// Read the key tuple out of a stored document
    pub fn key_of(&self, document: &Document) -> Result<Key> {
        let primary = document
            .get(&self.primary)
            .filter(|value| !value.is_null())
            .cloned()
            .ok_or_else(|| {
                Error::serialization(format!(
                    "document has no value for key field '{}'",
                    self.primary
                ))
            })?;
        let secondary = self
            .secondary
            .as_ref()
            .and_then(|field| document.get(field))
            .filter(|value| !value.is_null())
            .cloned();
        Ok(Key { primary, secondary })
    }
}

/// A key tuple paired with the full record it identifies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue<V> {
    /// Key values, read from the stored record
    pub key: Key,
    /// The record
    pub value: V,
}

impl<V> KeyValue<V> {
    /// Pair a key with a record
    pub fn new(key: Key, value: V) -> Self {
        Self { key, value }
    }

    /// Drop the key, keeping the record
    pub fn into_value(self) -> V {
        self.value
    }
}
