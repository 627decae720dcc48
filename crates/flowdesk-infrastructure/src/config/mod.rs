//! Configuration
//!
//! Typed configuration loaded with Figment from defaults, a TOML file and
//! the environment.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DatabaseConfig, LoggingConfig, RepositoryProvider};
