//! Value Objects
//!
//! Immutable values exchanged across the repository port.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`key`] | `Key`, `KeySchema`, `KeyValue` |
//! | [`document`] | `Document` and record conversion helpers |
//! | [`request`] | `CreateRequest`, `UpdateRequest`, `RepositoryOptions` |

/// Document representation and conversions
pub mod document;
/// Record keys and key schemas
pub mod key;
/// Create and update requests
pub mod request;

pub use document::{Document, from_document, matches_filter, to_document, values_equal};
pub use key::{Key, KeySchema, KeyValue};
pub use request::{CreateRequest, PreparedCreate, PreparedUpdate, RepositoryOptions, UpdateRequest};
