//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns shared by the binary and the tests.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration from defaults, TOML and environment |
//! | [`constants`] | Centralized configuration constants |
//! | [`error_ext`] | Context extension trait for foreign errors |
//! | [`factory`] | Repository adapter selected by configuration |
//! | [`logging`] | Structured logging with tracing |
//! | [`utils`] | Timing helpers |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod factory;
pub mod logging;
pub mod utils;

pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use factory::{open_record_repository, open_repository};
pub use utils::TimedOperation;
