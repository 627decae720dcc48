//! Record store configuration types

use crate::constants::{DEFAULT_DATABASE_NAME, DEFAULT_OPERATION_TIMEOUT_MS};
use flowdesk_domain::constants::DEFAULT_BATCH_CONCURRENCY;
use flowdesk_domain::error::{Error, Result};
use flowdesk_domain::value_objects::RepositoryOptions;
use flowdesk_providers::MongoSettings;
use flowdesk_providers::constants::{
    ENV_DB_PASSWORD, ENV_DB_URI, ENV_DB_USERNAME, MONGODB_APP_NAME, MONGODB_DEFAULT_AUTH_SOURCE,
    MONGODB_SERVER_SELECTION_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repository adapter selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryProvider {
    /// MongoDB document store
    #[default]
    Mongodb,
    /// Process-local store, lost on exit
    Memory,
}

/// Record store configuration
///
/// `uri`, `username` and `password` also load from `DB_URI`, `DB_USERNAME`
/// and `DB_PASSWORD`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub provider: RepositoryProvider,
    /// MongoDB host list (`host[:port][,host[:port]...]`)
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auth_source: String,
    pub database: String,
    pub app_name: String,
    /// Per-call deadline; 0 disables it
    pub operation_timeout_ms: u64,
    pub server_selection_timeout_ms: u64,
    /// Insert the filter plus patch when an update matches nothing
    pub upsert_on_update: bool,
    /// Batch elements in flight at once; 1 runs them sequentially
    pub batch_concurrency: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: RepositoryProvider::default(),
            uri: None,
            username: None,
            password: None,
            auth_source: MONGODB_DEFAULT_AUTH_SOURCE.to_string(),
            database: DEFAULT_DATABASE_NAME.to_string(),
            app_name: MONGODB_APP_NAME.to_string(),
            operation_timeout_ms: DEFAULT_OPERATION_TIMEOUT_MS,
            server_selection_timeout_ms: MONGODB_SERVER_SELECTION_TIMEOUT_MS,
            upsert_on_update: false,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl DatabaseConfig {
    /// Check the values the selected provider needs
    pub fn validate(&self) -> Result<()> {
        if self.batch_concurrency == 0 {
            return Err(Error::configuration(
                "database.batch_concurrency must be at least 1",
            ));
        }
        if self.provider == RepositoryProvider::Mongodb {
            self.mongo_settings()?;
        }
        Ok(())
    }

    /// Behaviour switches for repository handles
    pub fn repository_options(&self) -> RepositoryOptions {
        RepositoryOptions::new()
            .with_upsert(self.upsert_on_update)
            .with_batch_concurrency(self.batch_concurrency)
    }

    /// Connection settings for the MongoDB adapter
    ///
    /// # Errors
    /// `Configuration` naming the first missing credential.
    pub fn mongo_settings(&self) -> Result<MongoSettings> {
        let require = |value: &Option<String>, name: &str| {
            value
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::configuration(format!(
                        "{name} is not set; MongoDB credentials are required"
                    ))
                })
        };

        let operation_timeout = match self.operation_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        Ok(MongoSettings::new(
            require(&self.uri, ENV_DB_URI)?,
            require(&self.username, ENV_DB_USERNAME)?,
            require(&self.password, ENV_DB_PASSWORD)?,
        )?
        .with_auth_source(self.auth_source.clone())
        .with_app_name(self.app_name.clone())
        .with_server_selection_timeout(Duration::from_millis(self.server_selection_timeout_ms))
        .with_operation_timeout(operation_timeout))
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("provider", &self.provider)
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("auth_source", &self.auth_source)
            .field("database", &self.database)
            .field("app_name", &self.app_name)
            .field("operation_timeout_ms", &self.operation_timeout_ms)
            .field("server_selection_timeout_ms", &self.server_selection_timeout_ms)
            .field("upsert_on_update", &self.upsert_on_update)
            .field("batch_concurrency", &self.batch_concurrency)
            .finish()
    }
}
