/**
 * Backend Error Types
 *
 * Every failure a handler can answer with. Each variant knows its HTTP
 * status; `conversion.rs` turns it into a JSON body.
 *
 * # Error Categories
 *
 * - `Validation` - malformed or missing input, reported per field (400)
 * - `Unauthorized` - missing, invalid or expired token; bad credentials (401)
 * - `Forbidden` - authenticated, but not the owner of the resource (403)
 * - `NotFound` - parent record or sub-entry absent (404)
 * - `Conflict` - duplicate email, already liked / not yet liked (400)
 * - `Upstream` - the GitHub API did not answer with a listing (404)
 * - `Internal` - anything unexpected; the client only sees "Server Error" (500)
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::backend::store::StoreError;
use crate::shared::{LikeError, SharedError};

/// Message returned for every 500
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// A single entry of an `errors` array
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub msg: String,
    /// Request field the message refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
        }
    }

    /// Message not tied to a specific field
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use devconnect::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Post not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "There is no profile for this user");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more request fields failed validation
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// External repository API failure
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Unexpected failure; the message is logged, never sent
    #[error("Internal error: {0}")]
    Internal(String),

    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HandlerError { status, .. } => *status,
            Self::Store(err) => match err {
                StoreError::Duplicate(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Whether the client only gets the generic server error message
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        if self.is_internal() {
            return SERVER_ERROR_MESSAGE.to_string();
        }
        match self {
            Self::Validation(errors) => errors
                .iter()
                .map(|e| e.msg.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Upstream(message)
            | Self::Internal(message) => message.clone(),
            Self::HandlerError { message, .. } => message.clone(),
            Self::Store(err) => err.to_string(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::SharedError(err) => err.to_string(),
        }
    }

    /// Field-level errors, for errors rendered as an `errors` array
    pub fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::Conflict(message) => Some(vec![FieldError::general(message.clone())]),
            Self::Store(StoreError::Duplicate(message)) => {
                Some(vec![FieldError::general(message.clone())])
            }
            Self::SharedError(SharedError::ValidationError { field, message }) => {
                Some(vec![FieldError::new(field.clone(), message.clone())])
            }
            _ => None,
        }
    }
}

impl From<LikeError> for BackendError {
    fn from(err: LikeError) -> Self {
        Self::Conflict(err.to_string())
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid | TokenError::Expired => {
                Self::Unauthorized("Token is not valid".to_string())
            }
            TokenError::Signing(e) => Self::Internal(format!("token signing failed: {}", e)),
        }
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing failed: {}", err))
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        Self::Validation(vec![FieldError::general(rejection.body_text())])
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::SharedError(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "There is no profile for this user");
        match error {
            BackendError::HandlerError { status, ref message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "There is no profile for this user");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::validation(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BackendError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::conflict("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BackendError::upstream("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_generic() {
        let error = BackendError::internal("connection reset by peer at 10.0.0.3");
        assert_eq!(error.message(), SERVER_ERROR_MESSAGE);

        let error = BackendError::from(StoreError::Serialization(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        ));
        assert_eq!(error.message(), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_duplicate_store_error_is_conflict() {
        let error = BackendError::from(StoreError::Duplicate("User already exists".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.field_errors(),
            Some(vec![FieldError::general("User already exists")])
        );
    }

    #[test]
    fn test_from_like_error() {
        let error: BackendError = LikeError::AlreadyLiked.into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Post already Liked");
    }

    #[test]
    fn test_from_token_error() {
        let error: BackendError = TokenError::Expired.into();
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.message(), "Token is not valid");
    }

    #[test]
    fn test_from_shared_validation_error() {
        let error: BackendError = SharedError::validation("from", "from must be a valid date").into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.field_errors(),
            Some(vec![FieldError::new("from", "from must be a valid date")])
        );
    }
}
