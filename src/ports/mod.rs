//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the relay and the outside world. Adapters implement these ports.
//!
//! - `MessageBus` - Room-keyed pub/sub with private subscription handles
//! - `LogStore` - Append-only per-day chat log
//! - `PollQueue` - Per-client long-poll queues
//! - `ApiClientDirectory` - API token verification and display names

mod api_client_directory;
mod log_store;
mod message_bus;
mod poll_queue;

pub use api_client_directory::{
    digests_match, key_digest, ApiClientDirectory, ApiCredentials, DirectoryError,
};
pub(crate) use log_store::decode_record;
pub use log_store::{LogStore, LogStoreError};
pub use message_bus::{BusError, BusSubscription, MessageBus};
pub use poll_queue::{PollQueue, QueueError};
