//! Adapters - Implementations of port interfaces and the web surface.
//!
//! - `bus` - Message bus (in-memory, Redis pub/sub)
//! - `log_store` - Per-day chat logs (in-memory, Redis lists)
//! - `poll_queue` - Long-poll queues (in-memory, Redis lists)
//! - `clients` - API client directory (in-memory, Redis hashes)
//! - `http` - History, ingress and polling endpoints
//! - `websocket` - Live stream

pub mod bus;
pub mod clients;
pub mod http;
pub mod log_store;
pub mod poll_queue;
pub mod websocket;

pub use bus::{InMemoryMessageBus, RedisMessageBus};
pub use clients::{InMemoryClientDirectory, RedisClientDirectory};
pub use log_store::{InMemoryLogStore, RedisLogStore};
pub use poll_queue::{InMemoryPollQueue, RedisPollQueue};
