//! # Flowdesk - Provider Implementations
//!
//! Adapters implementing the ports defined in `flowdesk-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Repository | `Repository` | MongoDB, InMemory |
//! | Identifiers | `IdGenerator` | ObjectId |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! flowdesk-providers = { version = "0.1", default-features = false, features = ["repository-memory"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use flowdesk_providers::repository::{InMemoryRepository, MongoRepository};
//! use flowdesk_providers::id::ObjectIdGenerator;
//! ```

pub use flowdesk_domain::error::{Error, Result};
pub use flowdesk_domain::ports::{IdGenerator, Repository};

/// Provider-specific constants
pub mod constants;

/// Identifier generators
pub mod id;

/// Repository adapters
pub mod repository;

/// Shared utilities for repository adapters
pub mod utils;

pub use id::ObjectIdGenerator;
#[cfg(feature = "repository-memory")]
pub use repository::InMemoryRepository;
#[cfg(feature = "repository-mongodb")]
pub use repository::{MongoRepository, MongoSettings};
