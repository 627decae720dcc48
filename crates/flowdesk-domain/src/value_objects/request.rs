//! Create and update requests
//!
//! Each request type knows how to turn itself into the document (and filter)
//! an adapter sends to its store, so every adapter applies the same rules.

use crate::constants::{DEFAULT_BATCH_CONCURRENCY, IDENTITY_FIELD};
use crate::error::{Error, Result};
use crate::ports::IdGenerator;
use crate::value_objects::document::{Document, to_document};
use crate::value_objects::key::{Key, KeySchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to insert one record
///
/// Built with [`generated`](Self::generated), [`keyed`](Self::keyed) or
/// [`composite`](Self::composite), depending on which keys the caller supplies.
#[derive(Debug, Clone)]
pub struct CreateRequest<V> {
    key: Option<Key>,
    value: V,
}

impl<V> CreateRequest<V> {
    /// Insert without a key; the adapter generates the primary key
    pub fn generated(value: V) -> Self {
        Self { key: None, value }
    }

    /// Insert under an explicit primary key
    pub fn keyed<P: Into<Value>>(primary: P, value: V) -> Self {
        Self {
            key: Some(Key::new(primary)),
            value,
        }
    }

    /// Insert under explicit primary and secondary keys
    pub fn composite<P: Into<Value>, S: Into<Value>>(primary: P, secondary: S, value: V) -> Self {
        Self {
            key: Some(Key::composite(primary, secondary)),
            value,
        }
    }

    /// Keys supplied by the caller, if any
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// The record to insert
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: Serialize> CreateRequest<V> {
    /// Build the document to insert
    ///
    /// Supplied keys are written into the record's key fields. A record that
    /// already holds a different value in a key field is rejected. Without
    /// keys, the primary field is filled from `ids` when absent or null.
    pub fn prepare(&self, schema: &KeySchema, ids: &dyn IdGenerator) -> Result<PreparedCreate> {
        let mut document = to_document(&self.value)?;
        let mut generated = false;

        match &self.key {
            Some(key) => {
                embed_key_field(&mut document, schema.primary(), key.primary())?;
                if let Some(secondary) = key.secondary() {
                    let field = schema.secondary().ok_or_else(|| {
                        Error::invalid_argument(
                            "secondary key supplied but the repository has no secondary key field",
                        )
                    })?;
                    embed_key_field(&mut document, field, secondary)?;
                }
            }
            None => {
                let present = document
                    .get(schema.primary())
                    .is_some_and(|value| !value.is_null());
                if !present {
                    document.insert(schema.primary().to_string(), Value::String(ids.generate()));
                    generated = true;
                }
            }
        }

        let key = schema.key_of(&document)?;
        Ok(PreparedCreate {
            document,
            key,
            generated,
        })
    }
}

/// Document ready for insertion
#[derive(Debug, Clone)]
pub struct PreparedCreate {
    /// Document to insert
    pub document: Document,
    /// Key tuple read back from `document`
    pub key: Key,
    /// Whether the primary key was generated
    pub generated: bool,
}

fn embed_key_field(document: &mut Document, field: &str, value: &Value) -> Result<()> {
    match document.get(field) {
        Some(existing) if !existing.is_null() && existing != value => {
            Err(Error::invalid_argument(format!(
                "key field '{field}' holds {existing} but the supplied key is {value}"
            )))
        }
        _ => {
            document.insert(field.to_string(), value.clone());
            Ok(())
        }
    }
}

/// Request to merge fields into one stored record
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    patch: Document,
    key: Option<Key>,
}

impl UpdateRequest {
    /// Update selected by the identity field carried in `patch`
    ///
    /// Fails at preparation time when `patch` has no identity value.
    pub fn new(patch: Document) -> Self {
        Self { patch, key: None }
    }

    /// Update selected by `key`
    pub fn keyed(patch: Document, key: Key) -> Self {
        Self {
            patch,
            key: Some(key),
        }
    }

    /// Build the patch from any serialisable partial record
    pub fn from_partial<P: Serialize>(partial: &P) -> Result<Self> {
        Ok(Self::new(to_document(partial)?))
    }

    /// Select the record by `key`
    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Fields to set
    pub fn patch(&self) -> &Document {
        &self.patch
    }

    /// Key selecting the record, if supplied
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Split into the selecting filter and the fields to set
    ///
    /// The identity field is always removed from the fields to set. With no
    /// key, the stripped identity value selects the record; with neither,
    /// the request is rejected instead of matching nothing.
    pub fn prepare(&self, schema: &KeySchema) -> Result<PreparedUpdate> {
        let mut set = self.patch.clone();
        let stripped_identity = set.remove(IDENTITY_FIELD).filter(|value| !value.is_null());

        let filter = match (&self.key, &stripped_identity) {
            (Some(key), _) => schema.filter_for(key),
            (None, Some(identity)) => {
                let mut filter = Document::new();
                filter.insert(IDENTITY_FIELD.to_string(), identity.clone());
                filter
            }
            (None, None) => {
                return Err(Error::invalid_argument(format!(
                    "update needs a key or an '{IDENTITY_FIELD}' value in the patch"
                )));
            }
        };

        Ok(PreparedUpdate {
            filter,
            set,
            stripped_identity,
        })
    }
}

/// Filter and payload of an update
#[derive(Debug, Clone)]
pub struct PreparedUpdate {
    /// Equality filter selecting the record
    pub filter: Document,
    /// Fields to set, without the identity field
    pub set: Document,
    /// Identity value removed from the patch, if any
    pub stripped_identity: Option<Value>,
}

/// Behaviour switches of a repository handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryOptions {
    /// Insert the filter plus patch when an update matches nothing
    pub upsert_on_update: bool,
    /// Batch elements in flight at once; 1 runs them sequentially
    pub batch_concurrency: usize,
}

impl RepositoryOptions {
    /// Options with upsert disabled and sequential batches
    pub fn new() -> Self {
        Self {
            upsert_on_update: false,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }

    /// Enable or disable upsert on update
    #[must_use]
    pub fn with_upsert(mut self, upsert: bool) -> Self {
        self.upsert_on_update = upsert;
        self
    }

    /// Set the batch concurrency, clamped to at least 1
    #[must_use]
    pub fn with_batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self::new()
    }
}
