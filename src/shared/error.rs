//! Document errors
//!
//! Raised while building or reading a user, profile or post document, before
//! any HTTP status is attached. The backend maps `ValidationError` to a 400
//! with a per-field entry and `SerializationError` to a 500.
//!
//! ```rust
//! use devconnect::shared::error::SharedError;
//!
//! let err = SharedError::validation("from", "from must be a valid date");
//! assert_eq!(err.field(), Some("from"));
//! ```
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// A document could not be encoded or decoded as JSON
    #[error("document encoding failed: {message}")]
    SerializationError { message: String },

    /// A client-supplied value was rejected
    #[error("invalid {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl SharedError {
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Request field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
