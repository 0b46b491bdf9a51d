//! Frames accepted on the live stream.
//!
//! The client speaks once: `{"room": "<name>"}`. Everything the server sends
//! is either a raw bus payload or the literal join acknowledgement.

use serde::Deserialize;

/// Join request. Sending another one switches rooms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinRequest {
    pub room: String,
}

impl JoinRequest {
    pub fn parse(frame: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(frame)
    }
}
