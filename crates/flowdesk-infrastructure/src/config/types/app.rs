//! Main application configuration

use super::{DatabaseConfig, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Root of the configuration tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Record store configuration
    pub database: DatabaseConfig,
}
