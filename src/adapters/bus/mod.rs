//! Message bus adapters.
//!
//! - `InMemoryMessageBus` - In-process bus for tests
//! - `RedisMessageBus` - Redis pub/sub for production

mod in_memory;
mod redis;

pub use self::in_memory::InMemoryMessageBus;
pub use self::redis::RedisMessageBus;
