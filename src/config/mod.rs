//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FISHROOM` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use fishroom_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod chatlog;
mod error;
mod poll;
mod redis;
mod server;

pub use chatlog::ChatlogConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use poll::PollConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Redis configuration (bus, log, queues, client directory)
    pub redis: RedisConfig,

    /// Room bindings and history rules
    pub chatlog: ChatlogConfig,

    /// Long-poll behaviour
    #[serde(default)]
    pub poll: PollConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FISHROOM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FISHROOM__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FISHROOM__CHATLOG__BINDINGS=rust,linux` -> `chatlog.bindings = "rust,linux"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FISHROOM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Beyond the per-section checks, a request must be allowed to outlive
    /// a full long-poll wait.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.redis.validate()?;
        self.chatlog.validate()?;
        self.poll.validate()?;
        if self.server.request_timeout_secs <= self.poll.timeout_secs {
            return Err(ConfigValidationError::RequestTimeoutTooShort);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
