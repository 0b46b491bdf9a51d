//! Bus events and what a live connection does with them.

/// Event yielded by a bus subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// A published payload, verbatim.
    Message(String),
    /// The subscription is live.
    SubscribedAck,
    /// The bus connection behind the subscription is gone.
    Disconnected,
}

/// Literal sent to a client once its join is confirmed.
pub const JOIN_ACK: &str = "OK";

/// Action a live connection must take towards its client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutput {
    /// Push the payload as-is.
    Forward(String),
    /// Push [`JOIN_ACK`].
    Ack,
    /// Close the client connection.
    Close,
}
