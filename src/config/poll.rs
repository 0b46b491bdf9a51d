//! Long-poll configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ConfigValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// How long an empty poll waits before returning nothing
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PollConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ConfigValidationError::InvalidPollTimeout);
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
