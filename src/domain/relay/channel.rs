//! Bus channel naming.

use std::fmt;

/// A pub/sub channel on the message bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BusChannel {
    /// Every ingress publication, consumed by the archiver.
    Ingress,
    /// Archived messages for one room, consumed by live streams.
    Room(String),
}

impl BusChannel {
    pub fn room(room: impl Into<String>) -> Self {
        BusChannel::Room(room.into())
    }

    /// Channel name on the wire.
    pub fn key(&self) -> String {
        match self {
            BusChannel::Ingress => "fishroom".to_string(),
            BusChannel::Room(room) => format!("fishroom:room:{}", room),
        }
    }
}

impl fmt::Display for BusChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
