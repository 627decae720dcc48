//! Repository factory
//!
//! Builds the repository adapter named by `database.provider`.

use crate::config::{DatabaseConfig, RepositoryProvider};
use flowdesk_domain::error::Result;
use flowdesk_domain::ports::{Record, RecordValue, Repository};
use flowdesk_domain::value_objects::KeySchema;
use flowdesk_providers::{InMemoryRepository, MongoRepository};
use std::sync::Arc;
use tracing::info;

/// Open a repository over `collection` keyed by `schema`
///
/// # Errors
/// `Configuration` when the MongoDB provider is selected and credentials
/// are missing.
pub fn open_repository<V: RecordValue>(
    config: &DatabaseConfig,
    collection: &str,
    schema: KeySchema,
) -> Result<Arc<dyn Repository<V>>> {
    let options = config.repository_options();
    let repository: Arc<dyn Repository<V>> = match config.provider {
        RepositoryProvider::Mongodb => Arc::new(
            MongoRepository::new(&config.mongo_settings()?, &config.database, collection, schema)?
                .with_options(options),
        ),
        RepositoryProvider::Memory => {
            Arc::new(InMemoryRepository::new(schema).with_options(options))
        }
    };
    info!(
        provider = repository.provider_name(),
        database = %config.database,
        collection,
        "Repository opened"
    );
    Ok(repository)
}

/// Open a repository for a record type's own collection and key fields
pub fn open_record_repository<V: Record>(
    config: &DatabaseConfig,
) -> Result<Arc<dyn Repository<V>>> {
    open_repository(config, V::COLLECTION, KeySchema::for_record::<V>())
}
