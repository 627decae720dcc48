//! Error handling types
//!
//! Every repository adapter translates its store-native failures into this
//! taxonomy. A read that matches nothing is not an error: it is `Ok(None)`.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the store-facing variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for Flowdesk
#[derive(Error, Debug)]
pub enum Error {
    /// No document matched an operation that requires one
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// The store rejected an insert, update or delete
    #[error("Write failure: {message}")]
    WriteFailure {
        /// Description of the rejected write
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The store could not be reached, or the call timed out or was cancelled
    #[error("Connection failure: {message}")]
    ConnectionFailure {
        /// Description of the transport failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The adapter does not support the requested operation
    #[error("Not implemented: {operation}")]
    NotImplemented {
        /// Name of the unsupported operation
        operation: String,
    },

    /// Missing or invalid configuration
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid argument provided by the caller
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// A record could not be converted to or from a document
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the conversion failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Any other store-reported error
    #[error("Store error: {message}")]
    Store {
        /// Description of the store error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not implemented error
    pub fn not_implemented<S: Into<String>>(operation: S) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }
}

// Write error creation methods
impl Error {
    /// Create a write failure
    pub fn write_failure<S: Into<String>>(message: S) -> Self {
        Self::WriteFailure {
            message: message.into(),
            source: None,
        }
    }

    /// Create a write failure with source
    pub fn write_failure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::WriteFailure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Connection error creation methods
impl Error {
    /// Create a connection failure
    pub fn connection_failure<S: Into<String>>(message: S) -> Self {
        Self::ConnectionFailure {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failure with source
    pub fn connection_failure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::ConnectionFailure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Serialization and store error creation methods
impl Error {
    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create a serialization error with source
    pub fn serialization_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a store error with source
    pub fn store_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification helpers
impl Error {
    /// Whether this is the expected "nothing matched" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the caller may reasonably retry the operation
    ///
    /// Only transport failures qualify. No retry is performed internally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionFailure { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
