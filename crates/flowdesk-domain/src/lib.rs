//! # Flowdesk Domain
//!
//! Core types of the Flowdesk persistence layer. This crate has no storage
//! dependencies: adapters live in `flowdesk-providers`.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ports`] | `Repository` and `IdGenerator` contracts |
//! | [`value_objects`] | Keys, key schemas, documents, requests |
//! | [`entities`] | Workflow canvas records |
//! | [`error`] | Error taxonomy surfaced to callers |
//! | [`constants`] | Identity field and batch defaults |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ports::{IdGenerator, Record, RecordValue, Repository};
pub use value_objects::{
    CreateRequest, Document, Key, KeySchema, KeyValue, RepositoryOptions, UpdateRequest,
};
