//! Relay vocabulary: bus channels, bus events and the live connection
//! state machine.

mod channel;
mod connection;
mod events;

pub use channel::BusChannel;
pub use connection::ConnectionPhase;
pub use events::{BusEvent, RelayOutput, JOIN_ACK};
