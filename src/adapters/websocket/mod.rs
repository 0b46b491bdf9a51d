//! WebSocket adapter for the live stream.
//!
//! Each connection owns a [`LiveSession`](crate::application::LiveSession)
//! and therefore its own bus subscription. There is no shared room registry;
//! fan-out happens on the bus.
//!
//! - [`messages`] - Client frame types
//! - [`handler`] - Axum upgrade handler and the per-connection loop

pub mod handler;
pub mod messages;

pub use handler::{relay_connection, stream_handler, stream_routes, StreamState};
pub use messages::JoinRequest;
