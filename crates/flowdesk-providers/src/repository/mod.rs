//! Repository provider implementations
//!
//! Implements the `Repository` port over concrete stores.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | MongoRepository | Document store | MongoDB collection, one document per record |
//! | InMemoryRepository | Local | Process-local storage for tests and development |

#[cfg(feature = "repository-mongodb")]
pub mod mongo;

#[cfg(feature = "repository-memory")]
pub mod in_memory;

#[cfg(feature = "repository-mongodb")]
pub use mongo::{MongoRepository, MongoSettings};

#[cfg(feature = "repository-memory")]
pub use in_memory::InMemoryRepository;
