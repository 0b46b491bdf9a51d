//! Chat log domain: partition addressing, windowing, retention and room
//! access rules. Everything here is pure; storage lives behind
//! [`crate::ports::LogStore`].

mod access;
mod partition;
mod retention;
mod window;

pub use access::RoomAccess;
pub use partition::{LogPartition, RequestedDate};
pub use retention::RetentionPolicy;
pub use window::{LogWindow, WindowRequest};
