//! # Flowdesk
//!
//! Key/value record repositories over a document store.
//!
//! ## Crates
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Repository port, keys, requests, error taxonomy, workflow entities |
//! | [`application`] | Workflow board use cases |
//! | [`infrastructure`] | Configuration, logging, repository factory |
//! | [`providers`] | MongoDB and in-memory adapters |
//! | [`cli`] | The `flowdesk` command line |
//!
//! ## Example
//!
//! ```ignore
//! use flowdesk::domain::{CreateRequest, Key, KeySchema, Repository};
//! use flowdesk::providers::{MongoRepository, MongoSettings};
//!
//! let settings = MongoSettings::from_env()?;
//! let users: MongoRepository<User> =
//!     MongoRepository::new(&settings, "ProjectManagement", "Users", KeySchema::new("_id"))?;
//! let created = users.create(CreateRequest::generated(user)).await?;
//! let found = users.read(&created.key).await?;
//! ```

pub use flowdesk_application as application;
pub use flowdesk_domain as domain;
pub use flowdesk_infrastructure as infrastructure;
pub use flowdesk_providers as providers;

pub mod cli;

pub use flowdesk_domain::{
    CreateRequest, Error, Key, KeySchema, KeyValue, Repository, RepositoryOptions, Result,
    UpdateRequest,
};
