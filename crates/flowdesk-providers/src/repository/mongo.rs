//! MongoDB repository provider
//!
//! Document-store implementation of the repository port. Each record is one
//! document; each key is an equality filter on the key fields.
//!
//! ## Connection lifecycle
//!
//! Construction performs no I/O but must happen inside a Tokio runtime, where
//! a background task pings the server and logs the outcome. Calls issued
//! before that handshake completes wait in the driver's server selection.
//! [`MongoRepository::close`] consumes the handle, so it runs at most once.
//!
//! ## Example
//!
//! ```ignore
//! use flowdesk_providers::repository::{MongoRepository, MongoSettings};
//!
//! let settings = MongoSettings::from_env()?;
//! let repo: MongoRepository<User> =
//!     MongoRepository::new(&settings, "ProjectManagement", "Users", KeySchema::new("_id"))?;
//! let user = repo.read(&Key::new("1")).await?;
//! repo.close().await;
//! ```

mod config;
mod errors;

pub use config::MongoSettings;

use crate::constants::PROVIDER_MONGODB;
use crate::id::ObjectIdGenerator;
use crate::utils::CallGuard;
use crate::utils::documents::{any_of, from_bson_document, to_bson_document};
use async_trait::async_trait;
use bson::doc;
use errors::{Access, translate};
use flowdesk_domain::error::{Error, Result};
use flowdesk_domain::ports::{IdGenerator, Record, RecordValue, Repository};
use flowdesk_domain::value_objects::{
    CreateRequest, Key, KeySchema, KeyValue, RepositoryOptions, UpdateRequest, from_document,
};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// MongoDB-backed repository for records of type `V`
pub struct MongoRepository<V> {
    client: Client,
    collection: Collection<bson::Document>,
    database_name: String,
    collection_name: String,
    hosts: String,
    schema: KeySchema,
    options: RepositoryOptions,
    ids: Arc<dyn IdGenerator>,
    guard: CallGuard,
    _record: PhantomData<fn() -> V>,
}

impl<V: RecordValue> MongoRepository<V> {
    /// Bind a handle to `database.collection` with the given key fields
    ///
    /// # Errors
    /// `Configuration` when the settings cannot form driver options or no
    /// Tokio runtime is running.
    pub fn new(
        settings: &MongoSettings,
        database: &str,
        collection: &str,
        schema: KeySchema,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            Error::configuration_with_source("MongoDB repositories need a Tokio runtime", e)
        })?;
        let client = Client::with_options(settings.client_options()?).map_err(|e| {
            Error::configuration_with_source(format!("Failed to create MongoDB client: {e}"), e)
        })?;
        let handle = client.database(database).collection(collection);

        let mut guard = CallGuard::new();
        if let Some(timeout) = settings.operation_timeout() {
            guard = guard.with_timeout(timeout);
        }

        spawn_handshake(&runtime, &client, settings);

        Ok(Self {
            client,
            collection: handle,
            database_name: database.to_string(),
            collection_name: collection.to_string(),
            hosts: settings.hosts().to_string(),
            schema,
            options: RepositoryOptions::default(),
            ids: Arc::new(ObjectIdGenerator::new()),
            guard,
            _record: PhantomData,
        })
    }

    /// Bind a handle using credentials from the process environment
    pub fn from_env(database: &str, collection: &str, schema: KeySchema) -> Result<Self> {
        Self::new(&MongoSettings::from_env()?, database, collection, schema)
    }

    /// Replace the behaviour switches
    #[must_use]
    pub fn with_options(mut self, options: RepositoryOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the identifier generator used for keyless creates
    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Database this handle writes to
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Collection this handle writes to
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Round-trip a `ping` to the server
    pub async fn ping(&self) -> Result<()> {
        self.guard
            .run("ping", async {
                self.client
                    .database(&self.database_name)
                    .run_command(doc! { "ping": 1 })
                    .await
                    .map(|_| ())
                    .map_err(|e| translate(e, "ping", Access::Read))
            })
            .await
    }

    /// Drop the bound collection and every record in it
    pub async fn drop_collection(&self) -> Result<()> {
        info!(
            database = %self.database_name,
            collection = %self.collection_name,
            "Dropping collection"
        );
        self.guard
            .run("drop_collection", async {
                self.collection
                    .drop()
                    .await
                    .map_err(|e| translate(e, "drop_collection", Access::Write))
            })
            .await
    }

    /// Release the connection pool
    ///
    /// Consumes the handle, so it cannot be called twice.
    pub async fn close(self) {
        info!(
            hosts = %self.hosts,
            collection = %self.collection_name,
            "Closing MongoDB connection"
        );
        self.client.shutdown().await;
        info!(hosts = %self.hosts, "MongoDB connection closed");
    }

    fn decode(&self, document: bson::Document) -> Result<KeyValue<V>> {
        let document = from_bson_document(document)?;
        let key = self.schema.key_of(&document)?;
        Ok(KeyValue::new(key, from_document(document)?))
    }

    async fn find_one(
        &self,
        filter: bson::Document,
        operation: &str,
    ) -> Result<Option<KeyValue<V>>> {
        let found = self
            .guard
            .run(operation, async {
                self.collection
                    .find_one(filter)
                    .await
                    .map_err(|e| translate(e, operation, Access::Read))
            })
            .await?;
        found.map(|document| self.decode(document)).transpose()
    }
}

impl<V: Record> MongoRepository<V> {
    /// Bind a handle to the record type's own collection and key fields
    pub fn for_record(settings: &MongoSettings, database: &str) -> Result<Self> {
        Self::new(
            settings,
            database,
            V::COLLECTION,
            KeySchema::for_record::<V>(),
        )
    }
}

fn spawn_handshake(
    runtime: &tokio::runtime::Handle,
    client: &Client,
    settings: &MongoSettings,
) {
    let client = client.clone();
    let hosts = settings.hosts().to_string();
    let auth_source = settings.auth_source().to_string();
    runtime.spawn(async move {
        match client
            .database(&auth_source)
            .run_command(doc! { "ping": 1 })
            .await
        {
            Ok(_) => info!(hosts = %hosts, "MongoDB connected"),
            Err(e) => warn!(hosts = %hosts, error = %e, "MongoDB handshake failed"),
        }
    });
}

#[async_trait]
impl<V: RecordValue> Repository<V> for MongoRepository<V> {
    fn schema(&self) -> &KeySchema {
        &self.schema
    }

    fn options(&self) -> &RepositoryOptions {
        &self.options
    }

    fn provider_name(&self) -> &str {
        PROVIDER_MONGODB
    }

    async fn create(&self, request: CreateRequest<V>) -> Result<KeyValue<V>> {
        let prepared = request.prepare(&self.schema, self.ids.as_ref())?;
        let document = to_bson_document(&prepared.document)?;
        debug!(
            collection = %self.collection_name,
            key = ?prepared.key.parts(),
            generated = prepared.generated,
            "Inserting record"
        );

        self.guard
            .run("create", async {
                self.collection
                    .insert_one(document)
                    .await
                    .map_err(|e| translate(e, "create", Access::Write))
            })
            .await?;

        Ok(KeyValue::new(prepared.key, from_document(prepared.document)?))
    }

    async fn read(&self, key: &Key) -> Result<Option<KeyValue<V>>> {
        debug!(collection = %self.collection_name, key = ?key.parts(), "Reading record");
        let filter = to_bson_document(&self.schema.filter_for(key))?;
        self.find_one(filter, "read").await
    }

    async fn update(&self, request: UpdateRequest) -> Result<KeyValue<V>> {
        let prepared = request.prepare(&self.schema)?;
        if let Some(identity) = &prepared.stripped_identity {
            debug!(
                collection = %self.collection_name,
                identity = %identity,
                "Identity field removed from update payload"
            );
        }
        let filter = to_bson_document(&prepared.filter)?;
        let missing = || {
            Error::not_found(format!(
                "{}/{}",
                self.collection_name,
                serde_json::Value::Object(prepared.filter.clone())
            ))
        };

        if prepared.set.is_empty() {
            debug!(collection = %self.collection_name, "Update has no fields to set");
            return self.find_one(filter, "update").await?.ok_or_else(missing);
        }

        let set = to_bson_document(&prepared.set)?;
        let update = doc! { "$set": set };
        let upsert = self.options.upsert_on_update;
        debug!(collection = %self.collection_name, upsert, "Updating record");

        let updated = self
            .guard
            .run("update", async {
                self.collection
                    .find_one_and_update(filter, update)
                    .upsert(upsert)
                    .return_document(ReturnDocument::After)
                    .await
                    .map_err(|e| translate(e, "update", Access::Write))
            })
            .await?;

        updated
            .map(|document| self.decode(document))
            .transpose()?
            .ok_or_else(missing)
    }

    async fn delete(&self, key: &Key) -> Result<bool> {
        debug!(collection = %self.collection_name, key = ?key.parts(), "Deleting record");
        let filter = to_bson_document(&self.schema.filter_for(key))?;
        let result = self
            .guard
            .run("delete", async {
                self.collection
                    .delete_one(filter)
                    .await
                    .map_err(|e| translate(e, "delete", Access::Write))
            })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn many_read(&self, keys: Option<&[Key]>) -> Result<Vec<KeyValue<V>>> {
        let filter = match keys {
            None => doc! {},
            Some([]) => return Ok(Vec::new()),
            Some(keys) => any_of(&self.schema.filters_for(keys))?,
        };
        debug!(
            collection = %self.collection_name,
            keys = keys.map_or(0, <[Key]>::len),
            "Reading records"
        );

        let documents: Vec<bson::Document> = self
            .guard
            .run("many_read", async {
                let cursor = self
                    .collection
                    .find(filter)
                    .await
                    .map_err(|e| translate(e, "many_read", Access::Read))?;
                cursor
                    .try_collect()
                    .await
                    .map_err(|e| translate(e, "many_read", Access::Read))
            })
            .await?;

        documents
            .into_iter()
            .map(|document| self.decode(document))
            .collect()
    }
}

impl<V> std::fmt::Debug for MongoRepository<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoRepository")
            .field("hosts", &self.hosts)
            .field("database", &self.database_name)
            .field("collection", &self.collection_name)
            .field("schema", &self.schema)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
