//! API client directory adapters.

mod in_memory;
mod redis;

pub use self::in_memory::InMemoryClientDirectory;
pub use self::redis::{RedisClientDirectory, NAMES_KEY, TOKENS_KEY};
