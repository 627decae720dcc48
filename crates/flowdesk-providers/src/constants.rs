//! Provider Constants
//!
//! Constants specific to repository adapter implementations. Domain
//! constants live in `flowdesk_domain::constants`.

// ============================================================================
// MONGODB CONNECTION CONSTANTS
// ============================================================================

/// Environment variable holding the MongoDB host list (`host[:port][,host...]`)
pub const ENV_DB_URI: &str = "DB_URI";

/// Environment variable holding the MongoDB username
pub const ENV_DB_USERNAME: &str = "DB_USERNAME";

/// Environment variable holding the MongoDB password
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";

/// Authentication database used when none is configured
pub const MONGODB_DEFAULT_AUTH_SOURCE: &str = "admin";

/// Client application name reported to the server
pub const MONGODB_APP_NAME: &str = "flowdesk";

/// Server selection timeout in milliseconds
pub const MONGODB_SERVER_SELECTION_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// PROVIDER NAMES
// ============================================================================

/// Name reported by the MongoDB repository
pub const PROVIDER_MONGODB: &str = "mongodb";

/// Name reported by the in-memory repository
pub const PROVIDER_MEMORY: &str = "memory";
