//! Configuration types

pub mod app;
pub mod database;
pub mod logging;

pub use app::AppConfig;
pub use database::{DatabaseConfig, RepositoryProvider};
pub use logging::LoggingConfig;
