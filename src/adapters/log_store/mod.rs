//! Log store adapters.
//!
//! - `InMemoryLogStore` - Process-local storage for tests and development
//! - `RedisLogStore` - Redis lists, one per `(room, date)` partition

mod in_memory;
mod redis;

pub use self::in_memory::InMemoryLogStore;
pub use self::redis::RedisLogStore;
