//! Long-poll queue adapters.

mod in_memory;
mod redis;

pub use self::in_memory::InMemoryPollQueue;
pub use self::redis::{queue_key, RedisPollQueue};
