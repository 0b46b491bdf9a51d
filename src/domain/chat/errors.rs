//! Outcome taxonomy for relay operations.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

/// Errors returned by ingress, history and long-poll operations.
///
/// A long-poll timeout is not an error; it is an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Malformed input. Never retried.
    #[error("{0}")]
    BadRequest(String),

    /// Authentication failure or retention-window violation.
    #[error("{0}")]
    Forbidden(String),

    /// Unknown or private room, or missing log index.
    #[error("{0}")]
    NotFound(String),

    /// The bus connection was lost.
    #[error("Upstream bus disconnected")]
    UpstreamDisconnected,

    /// Storage or transport failure, including corrupt log records.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ChatError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ChatError::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ChatError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ChatError::NotFound(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ChatError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::BadRequest(_) => ErrorCode::BadRequest,
            ChatError::Forbidden(_) => ErrorCode::Forbidden,
            ChatError::NotFound(_) => ErrorCode::NotFound,
            ChatError::UpstreamDisconnected => ErrorCode::UpstreamDisconnected,
            ChatError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for ChatError {
    fn from(err: ValidationError) -> Self {
        ChatError::BadRequest(err.to_string())
    }
}
