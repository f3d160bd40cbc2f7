//! Error types for console operations.
//!
//! Two layers: [`ValidationError`] is what the console shows the user as a
//! flash message when a form is rejected, and [`ConsoleError`] is everything
//! a console operation can fail with. Waiting has its own
//! [`WaitError`](crate::wait::WaitError), which wraps these unchanged.

use crate::storage::StorageError;

/// Main error type for console operations.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Form rejected; the message is the console's flash text.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Entity lookup failed
    #[error("{entity} '{key}' not found")]
    NotFound { entity: String, key: String },

    /// Entity with the same key already exists
    #[error("{entity} '{key}' already exists")]
    AlreadyExists { entity: String, key: String },

    /// Entity is still referenced and cannot be removed
    #[error("{entity} '{key}' is still in use by {used_by}")]
    InUse {
        entity: String,
        key: String,
        used_by: String,
    },

    /// Action not offered for the entity in its current state
    #[error("Action '{action}' is not available for {entity} '{key}'")]
    InvalidAction {
        entity: String,
        key: String,
        action: String,
    },

    /// Storage layer failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading configuration or fixtures failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Form validation failures, rendered exactly as the console's flash messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required text field left empty
    #[error("{field} can't be blank")]
    Blank { field: String },

    /// Unique field collides with an existing entity
    #[error("{field} has already been taken")]
    Taken { field: String },

    #[error("Password and Verify Password fields do not match")]
    PasswordMismatch,

    #[error("A User must be assigned to a Group")]
    MissingGroup,

    #[error("A Group must have a Role assigned")]
    MissingRole,

    #[error("Email must be a valid email address")]
    InvalidEmail,

    /// Required select or reference left unset
    #[error("'{field}' is required")]
    Required { field: String },

    /// Select points at an entity the console does not know
    #[error("{entity} '{key}' does not exist")]
    UnknownReference { entity: String, key: String },

    #[error("{message}")]
    Custom { message: String },
}

impl ConsoleError {
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            key: key.into(),
        }
    }

    pub fn in_use(
        entity: impl Into<String>,
        key: impl Into<String>,
        used_by: impl Into<String>,
    ) -> Self {
        Self::InUse {
            entity: entity.into(),
            key: key.into(),
            used_by: used_by.into(),
        }
    }

    pub fn invalid_action(
        entity: impl Into<String>,
        key: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self::InvalidAction {
            entity: entity.into(),
            key: key.into(),
            action: action.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The flash message, when this is a validation failure.
    pub fn flash_message(&self) -> Option<String> {
        match self {
            ConsoleError::Validation(v) => Some(v.to_string()),
            _ => None,
        }
    }
}

impl ValidationError {
    pub fn blank(field: impl Into<String>) -> Self {
        Self::Blank {
            field: field.into(),
        }
    }

    pub fn taken(field: impl Into<String>) -> Self {
        Self::Taken {
            field: field.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::Required {
            field: field.into(),
        }
    }

    pub fn unknown_reference(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnknownReference {
            entity: entity.into(),
            key: key.into(),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
