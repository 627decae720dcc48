//! Domain Port Interfaces
//!
//! Contracts the outer layers implement.
//!
//! | Port | Description |
//! |------|-------------|
//! | [`Repository`] | Key/value record storage over an arbitrary backend |
//! | [`IdGenerator`] | Fresh identifiers for records created without a key |

/// Identifier generator port
pub mod id_generator;
/// Repository port
pub mod repository;

pub use id_generator::IdGenerator;
pub use repository::{Record, RecordValue, Repository};
