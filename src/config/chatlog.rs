//! Chat log configuration: room bindings, visibility and history limits

use serde::Deserialize;

use super::error::ConfigValidationError;
use crate::domain::chatlog::{RetentionPolicy, RoomAccess};
use crate::domain::foundation::SystemClock;

/// Chat log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatlogConfig {
    /// Rooms bridged by this deployment (comma-separated)
    #[serde(default)]
    pub bindings: String,

    /// Bound rooms whose logs are never served (comma-separated)
    pub private_rooms: Option<String>,

    /// Room `/` redirects to; the first binding when unset
    pub default_room: Option<String>,

    /// Fixed UTC offset of the chat's calendar
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,

    /// Days of history served, counting back from today
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Window size for embedded views without an explicit limit
    #[serde(default = "default_embedded_limit")]
    pub embedded_limit: u64,

    /// Public URL the relay is served under
    #[serde(default)]
    pub baseurl: String,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl ChatlogConfig {
    pub fn bindings_list(&self) -> Vec<String> {
        split_list(&self.bindings)
    }

    pub fn private_rooms_list(&self) -> Vec<String> {
        self.private_rooms
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
    }

    /// Configured default room, falling back to the first binding.
    pub fn default_room(&self) -> Option<String> {
        self.default_room
            .clone()
            .or_else(|| self.bindings_list().into_iter().next())
    }

    /// Path component of `baseurl`, without a trailing slash.
    pub fn base_path(&self) -> String {
        let rest = match self.baseurl.split_once("://") {
            Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or(""),
            None => self.baseurl.as_str(),
        };
        rest.trim_end_matches('/').to_string()
    }

    pub fn room_access(&self) -> RoomAccess {
        RoomAccess::new(self.bindings_list(), self.private_rooms_list())
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.retention_days)
    }

    /// Wall clock in the configured zone. `None` if the offset is out of range.
    pub fn clock(&self) -> Option<SystemClock> {
        SystemClock::with_utc_offset_hours(self.utc_offset_hours)
    }

    /// Validate chat log configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let bindings = self.bindings_list();
        if bindings.is_empty() {
            return Err(ConfigValidationError::MissingRequired("CHATLOG__BINDINGS"));
        }
        if let Some(room) = &self.default_room {
            if !bindings.contains(room) {
                return Err(ConfigValidationError::DefaultRoomNotBound(room.clone()));
            }
        }
        if self.clock().is_none() {
            return Err(ConfigValidationError::InvalidUtcOffset);
        }
        if self.retention_days == 0 {
            return Err(ConfigValidationError::InvalidRetention);
        }
        if self.embedded_limit == 0 {
            return Err(ConfigValidationError::InvalidEmbeddedLimit);
        }
        Ok(())
    }
}

impl Default for ChatlogConfig {
    fn default() -> Self {
        Self {
            bindings: String::new(),
            private_rooms: None,
            default_room: None,
            utc_offset_hours: default_utc_offset_hours(),
            retention_days: default_retention_days(),
            embedded_limit: default_embedded_limit(),
            baseurl: String::new(),
        }
    }
}

fn default_utc_offset_hours() -> i32 {
    8
}

fn default_retention_days() -> u32 {
    7
}

fn default_embedded_limit() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(bindings: &str) -> ChatlogConfig {
        ChatlogConfig {
            bindings: bindings.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = ChatlogConfig::default();
        assert_eq!(config.utc_offset_hours, 8);
        assert_eq!(config.retention_days, 7);
        assert_eq!(config.embedded_limit, 15);
    }

    #[test]
    fn test_lists_are_trimmed() {
        let config = ChatlogConfig {
            private_rooms: Some(" secret ,".to_string()),
            ..bound("rust, linux ,secret")
        };
        assert_eq!(config.bindings_list(), vec!["rust", "linux", "secret"]);
        assert_eq!(config.private_rooms_list(), vec!["secret"]);
        assert!(!config.room_access().is_public("secret"));
        assert!(config.room_access().is_public("linux"));
    }

    #[test]
    fn test_default_room_falls_back_to_first_binding() {
        assert_eq!(bound("rust,linux").default_room(), Some("rust".to_string()));

        let config = ChatlogConfig {
            default_room: Some("linux".to_string()),
            ..bound("rust,linux")
        };
        assert_eq!(config.default_room(), Some("linux".to_string()));
    }

    #[test]
    fn test_base_path() {
        let with = |baseurl: &str| ChatlogConfig {
            baseurl: baseurl.to_string(),
            ..bound("rust")
        };
        assert_eq!(with("https://chat.example.com/fishroom/").base_path(), "/fishroom");
        assert_eq!(with("https://chat.example.com").base_path(), "");
        assert_eq!(with("/relay").base_path(), "/relay");
        assert_eq!(with("").base_path(), "");
    }

    #[test]
    fn test_validation_requires_bindings() {
        assert_eq!(
            bound(" , ").validate(),
            Err(ConfigValidationError::MissingRequired("CHATLOG__BINDINGS"))
        );
    }

    #[test]
    fn test_validation_default_room_must_be_bound() {
        let config = ChatlogConfig {
            default_room: Some("nowhere".to_string()),
            ..bound("rust")
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DefaultRoomNotBound("nowhere".to_string()))
        );
    }

    #[test]
    fn test_validation_limits() {
        let offset = ChatlogConfig {
            utc_offset_hours: 30,
            ..bound("rust")
        };
        let retention = ChatlogConfig {
            retention_days: 0,
            ..bound("rust")
        };
        let embedded = ChatlogConfig {
            embedded_limit: 0,
            ..bound("rust")
        };
        assert_eq!(offset.validate(), Err(ConfigValidationError::InvalidUtcOffset));
        assert_eq!(retention.validate(), Err(ConfigValidationError::InvalidRetention));
        assert_eq!(embedded.validate(), Err(ConfigValidationError::InvalidEmbeddedLimit));
        assert!(bound("rust").validate().is_ok());
    }
}
