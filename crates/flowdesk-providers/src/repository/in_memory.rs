//! In-memory repository provider
//!
//! Keeps documents in a vector behind an async lock. Mirrors the MongoDB
//! adapter's observable behaviour: every document carries an `_id` (one is
//! assigned when the record has none), `_id` values are unique, filters are
//! field equality with numbers compared by value (`1` matches `1.0`) and
//! `many_read` returns documents in insertion order.
//! Data is not persisted and is lost when the handle is dropped.

use crate::constants::PROVIDER_MEMORY;
use crate::id::ObjectIdGenerator;
use async_trait::async_trait;
use flowdesk_domain::constants::IDENTITY_FIELD;
use flowdesk_domain::error::{Error, Result};
use flowdesk_domain::ports::{IdGenerator, Record, RecordValue, Repository};
use flowdesk_domain::value_objects::{
    CreateRequest, Document, Key, KeySchema, KeyValue, RepositoryOptions, UpdateRequest,
    from_document, matches_filter, values_equal,
};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory repository for records of type `V`
pub struct InMemoryRepository<V> {
    documents: Arc<RwLock<Vec<Document>>>,
    schema: KeySchema,
    options: RepositoryOptions,
    ids: Arc<dyn IdGenerator>,
    _record: PhantomData<fn() -> V>,
}

impl<V: RecordValue> InMemoryRepository<V> {
    /// Create an empty repository with the given key fields
    pub fn new(schema: KeySchema) -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
            schema,
            options: RepositoryOptions::default(),
            ids: Arc::new(ObjectIdGenerator::new()),
            _record: PhantomData,
        }
    }

    /// Replace the behaviour switches
    #[must_use]
    pub fn with_options(mut self, options: RepositoryOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the identifier generator
    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Drop every stored document
    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }

    fn decode(&self, document: Document) -> Result<KeyValue<V>> {
        let key = self.schema.key_of(&document)?;
        Ok(KeyValue::new(key, from_document(document)?))
    }

    fn ensure_identity(&self, document: &mut Document) {
        let present = document
            .get(IDENTITY_FIELD)
            .is_some_and(|value| !value.is_null());
        if !present {
            document.insert(
                IDENTITY_FIELD.to_string(),
                Value::String(self.ids.generate()),
            );
        }
    }
}

impl<V: Record> InMemoryRepository<V> {
    /// Create an empty repository keyed the way the record type declares
    pub fn for_record() -> Self {
        Self::new(KeySchema::for_record::<V>())
    }
}

impl<V> Clone for InMemoryRepository<V> {
    /// Clones share the same storage
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            schema: self.schema.clone(),
            options: self.options.clone(),
            ids: Arc::clone(&self.ids),
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<V: RecordValue> Repository<V> for InMemoryRepository<V> {
    fn schema(&self) -> &KeySchema {
        &self.schema
    }

    fn options(&self) -> &RepositoryOptions {
        &self.options
    }

    fn provider_name(&self) -> &str {
        PROVIDER_MEMORY
    }

    async fn create(&self, request: CreateRequest<V>) -> Result<KeyValue<V>> {
        let prepared = request.prepare(&self.schema, self.ids.as_ref())?;
        let mut stored = prepared.document.clone();
        self.ensure_identity(&mut stored);

        let mut documents = self.documents.write().await;
        if documents
            .iter()
            .any(|existing| match (existing.get(IDENTITY_FIELD), stored.get(IDENTITY_FIELD)) {
                (Some(left), Some(right)) => values_equal(left, right),
                _ => false,
            })
        {
            return Err(Error::write_failure(format!(
                "duplicate key: a record with {IDENTITY_FIELD} {} already exists",
                stored.get(IDENTITY_FIELD).unwrap_or(&Value::Null)
            )));
        }
        debug!(key = ?prepared.key.parts(), generated = prepared.generated, "Inserting record");
        documents.push(stored);

        Ok(KeyValue::new(prepared.key, from_document(prepared.document)?))
    }

    async fn read(&self, key: &Key) -> Result<Option<KeyValue<V>>> {
        let filter = self.schema.filter_for(key);
        let found = self
            .documents
            .read()
            .await
            .iter()
            .find(|document| matches_filter(&filter, document))
            .cloned();
        found.map(|document| self.decode(document)).transpose()
    }

    async fn update(&self, request: UpdateRequest) -> Result<KeyValue<V>> {
        let prepared = request.prepare(&self.schema)?;
        let missing = || {
            Error::not_found(format!(
                "record matching {}",
                Value::Object(prepared.filter.clone())
            ))
        };

        let mut documents = self.documents.write().await;
        let position = documents
            .iter()
            .position(|document| matches_filter(&prepared.filter, document));

        let updated = match position {
            Some(index) => {
                let document = &mut documents[index];
                document.extend(prepared.set.clone());
                document.clone()
            }
            None if prepared.set.is_empty() || !self.options.upsert_on_update => {
                return Err(missing());
            }
            None => {
                let mut document = prepared.filter.clone();
                document.extend(prepared.set.clone());
                self.ensure_identity(&mut document);
                debug!(
                    filter = %serde_json::Value::Object(prepared.filter.clone()),
                    "Upserting record"
                );
                documents.push(document.clone());
                document
            }
        };
        drop(documents);

        self.decode(updated)
    }

    async fn delete(&self, key: &Key) -> Result<bool> {
        let filter = self.schema.filter_for(key);
        let mut documents = self.documents.write().await;
        match documents
            .iter()
            .position(|document| matches_filter(&filter, document))
        {
            Some(index) => {
                documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn many_read(&self, keys: Option<&[Key]>) -> Result<Vec<KeyValue<V>>> {
        let filters = match keys {
            None => None,
            Some([]) => return Ok(Vec::new()),
            Some(keys) => Some(self.schema.filters_for(keys)),
        };

        let selected: Vec<Document> = self
            .documents
            .read()
            .await
            .iter()
            .filter(|document| {
                filters.as_ref().is_none_or(|filters| {
                    filters.iter().any(|filter| matches_filter(filter, document))
                })
            })
            .cloned()
            .collect();

        selected
            .into_iter()
            .map(|document| self.decode(document))
            .collect()
    }
}

impl<V> std::fmt::Debug for InMemoryRepository<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("schema", &self.schema)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
