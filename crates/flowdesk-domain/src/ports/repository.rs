//! Repository Port
//!
//! Storage-agnostic key/value access to records. Single-record operations
//! are atomic; batch operations run each element on its own and report one
//! result per input, in input order, with no all-or-nothing guarantee.
//!
//! ## Example
//!
//! ```ignore
//! use flowdesk_domain::ports::Repository;
//! use flowdesk_domain::value_objects::{CreateRequest, Key, UpdateRequest};
//!
//! let created = repo.create(CreateRequest::keyed("1", user)).await?;
//! let found = repo.read(&Key::new("1")).await?;
//! let updated = repo
//!     .update(UpdateRequest::from_partial(&rename)?.with_key(Key::new("1")))
//!     .await?;
//! assert!(repo.delete(&Key::new("1")).await?);
//! ```

use crate::error::Result;
use crate::value_objects::{
    CreateRequest, Key, KeySchema, KeyValue, RepositoryOptions, UpdateRequest,
};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Bounds every stored record type satisfies
pub trait RecordValue: Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> RecordValue for T where T: Serialize + DeserializeOwned + Send + Sync + 'static {}

/// A record type that declares its own key fields
///
/// # Example
///
/// ```ignore
/// impl Record for BoardMember {
///     const COLLECTION: &'static str = "members";
///     const PRIMARY_KEY: &'static str = "board";
///     const SECONDARY_KEY: Option<&'static str> = Some("user");
/// }
/// ```
pub trait Record: RecordValue {
    /// Collection the records are stored in
    const COLLECTION: &'static str;
    /// Primary key field
    const PRIMARY_KEY: &'static str;
    /// Secondary key field for composite keys
    const SECONDARY_KEY: Option<&'static str> = None;
}

/// Repository: key/value record storage
///
/// Every operation may suspend on I/O without blocking other callers sharing
/// the same handle. The key schema and options are fixed for the handle's
/// lifetime.
#[async_trait]
pub trait Repository<V: RecordValue>: Send + Sync {
    /// Key fields this handle is bound to
    fn schema(&self) -> &KeySchema;

    /// Behaviour switches of this handle
    fn options(&self) -> &RepositoryOptions;

    /// Name of the adapter (e.g., "mongodb", "memory")
    fn provider_name(&self) -> &str;

    /// Insert one record
    ///
    /// # Errors
    /// `WriteFailure` when the store rejects the insert (e.g. duplicate key),
    /// `InvalidArgument` when supplied keys contradict the record.
    async fn create(&self, request: CreateRequest<V>) -> Result<KeyValue<V>>;

    /// Fetch the record identified by `key`
    ///
    /// # Returns
    /// `None` when nothing matches; only transport problems are errors.
    async fn read(&self, key: &Key) -> Result<Option<KeyValue<V>>>;

    /// Merge the request's fields into one record and return it afterwards
    ///
    /// # Errors
    /// `NotFound` when nothing matched and upsert is disabled,
    /// `InvalidArgument` when the request has no usable key.
    async fn update(&self, request: UpdateRequest) -> Result<KeyValue<V>>;

    /// Remove at most one record
    ///
    /// # Returns
    /// True if a record was removed, false if nothing matched
    async fn delete(&self, key: &Key) -> Result<bool>;

    /// Fetch several records
    ///
    /// `None` returns every record. `Some(keys)` returns records matching any
    /// of the keys; an empty slice matches nothing. Order is store-native.
    async fn many_read(&self, keys: Option<&[Key]>) -> Result<Vec<KeyValue<V>>>;

    /// Insert each record independently
    async fn many_create(&self, requests: Vec<CreateRequest<V>>) -> Vec<Result<KeyValue<V>>> {
        stream::iter(requests)
            .map(|request| self.create(request))
            .buffered(self.options().batch_concurrency.max(1))
            .collect()
            .await
    }

    /// Apply each update independently
    async fn many_update(&self, requests: Vec<UpdateRequest>) -> Vec<Result<KeyValue<V>>> {
        stream::iter(requests)
            .map(|request| self.update(request))
            .buffered(self.options().batch_concurrency.max(1))
            .collect()
            .await
    }

    /// Delete each key independently
    async fn many_delete(&self, keys: Vec<Key>) -> Vec<Result<bool>> {
        let concurrency = self.options().batch_concurrency.max(1);
        stream::iter(keys)
            .map(|key| async move { self.delete(&key).await })
            .buffered(concurrency)
            .collect()
            .await
    }
}
