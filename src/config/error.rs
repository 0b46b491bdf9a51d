//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid long-poll timeout")]
    InvalidPollTimeout,

    #[error("Request timeout must exceed the long-poll timeout")]
    RequestTimeoutTooShort,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Default room '{0}' is not bound")]
    DefaultRoomNotBound(String),

    #[error("UTC offset must be between -23 and 23 hours")]
    InvalidUtcOffset,

    #[error("Retention must be at least one day")]
    InvalidRetention,

    #[error("Embedded limit must be positive")]
    InvalidEmbeddedLimit,
}
