//! Domain layer constants
//!
//! Contains constants that are part of the repository contract. Adapter and
//! infrastructure constants live in their own crates.

// ============================================================================
// RECORD IDENTITY CONSTANTS
// ============================================================================

/// Immutable identity field of every stored document
///
/// Never included in an update payload.
pub const IDENTITY_FIELD: &str = "_id";

// ============================================================================
// BATCH CONSTANTS
// ============================================================================

/// Default number of batch elements in flight at once (sequential)
pub const DEFAULT_BATCH_CONCURRENCY: usize = 1;
