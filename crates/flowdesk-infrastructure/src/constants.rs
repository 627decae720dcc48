//! Infrastructure constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "flowdesk.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "flowdesk";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "FLOWDESK";

/// Separator between the prefix and nested keys (`FLOWDESK__DATABASE__URI`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// DATABASE CONSTANTS
// ============================================================================

/// Database used when none is configured
pub const DEFAULT_DATABASE_NAME: &str = "ProjectManagement";

/// Per-call deadline in milliseconds; 0 disables it
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 0;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "FLOWDESK_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;

/// File name prefix used when the configured log path has no stem
pub const LOG_FILE_PREFIX: &str = "flowdesk";
