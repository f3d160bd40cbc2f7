//! Storage-specific error types.
//!
//! These cover failures of the document store itself. Console rules
//! (uniqueness, references, validation) are reported as
//! [`ConsoleError`](crate::error::ConsoleError) by the layer above.

use std::fmt;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A document could not be stored under the given key.
    InvalidData {
        message: String,
        cause: Option<String>,
    },

    /// Invalid search criteria.
    InvalidQuery { message: String, path: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidData { message, cause } => {
                if let Some(cause) = cause {
                    write!(f, "Invalid data: {} (cause: {})", message, cause)
                } else {
                    write!(f, "Invalid data: {}", message)
                }
            }
            StorageError::InvalidQuery { message, path } => {
                write!(f, "Invalid query on '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
            cause: None,
        }
    }

    pub fn invalid_query(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
            path: path.into(),
        }
    }
}
