//! Driver error translation
//!
//! Maps driver errors onto the repository taxonomy. Nothing is swallowed:
//! every driver error becomes exactly one domain error.

use flowdesk_domain::error::Error;
use mongodb::error::{Error as DriverError, ErrorKind};

/// Whether the failing call read or wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Connection,
    Serialization,
    Write,
    Other,
}

fn categorize(kind: &ErrorKind) -> Category {
    match kind {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Authentication { .. } => Category::Connection,
        ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
            Category::Serialization
        }
        ErrorKind::Write(_) => Category::Write,
        _ => Category::Other,
    }
}

/// Translate a driver error raised by `operation`
pub(crate) fn translate(error: DriverError, operation: &str, access: Access) -> Error {
    let message = format!("{operation} failed: {error}");
    match (categorize(&error.kind), access) {
        (Category::Connection, _) => Error::connection_failure_with_source(message, error),
        (Category::Serialization, _) => Error::serialization_with_source(message, error),
        (Category::Write, _) | (Category::Other, Access::Write) => {
            Error::write_failure_with_source(message, error)
        }
        (Category::Other, Access::Read) => Error::store_with_source(message, error),
    }
}
