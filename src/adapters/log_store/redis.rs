//! Redis list-backed chat log.
//!
//! One list per partition: RPUSH to append (the returned length gives the
//! index), LLEN for length, LRANGE for windows.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::chat::Message;
use crate::domain::chatlog::LogPartition;
use crate::ports::{decode_record, LogStore, LogStoreError};

/// Redis-backed log store.
#[derive(Clone)]
pub struct RedisLogStore {
    conn: MultiplexedConnection,
}

impl RedisLogStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

fn unavailable(e: redis::RedisError) -> LogStoreError {
    LogStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl LogStore for RedisLogStore {
    async fn append(
        &self,
        partition: &LogPartition,
        message: &Message,
    ) -> Result<u64, LogStoreError> {
        let raw = message
            .to_json()
            .map_err(|e| LogStoreError::Encode(e.to_string()))?;
        let mut conn = self.conn.clone();
        let len: u64 = conn.rpush(partition.key(), raw).await.map_err(unavailable)?;
        Ok(len.saturating_sub(1))
    }

    async fn length(&self, partition: &LogPartition) -> Result<u64, LogStoreError> {
        let mut conn = self.conn.clone();
        conn.llen(partition.key()).await.map_err(unavailable)
    }

    async fn range(
        &self,
        partition: &LogPartition,
        start: u64,
        end: u64,
    ) -> Result<Vec<Message>, LogStoreError> {
        // LRANGE treats negative ends as offsets from the tail, so inverted
        // windows must never reach Redis.
        if start > end {
            return Ok(Vec::new());
        }
        let start_idx = isize::try_from(start).unwrap_or(isize::MAX);
        let end_idx = isize::try_from(end).unwrap_or(isize::MAX);

        let mut conn = self.conn.clone();
        let raw: Vec<String> = conn
            .lrange(partition.key(), start_idx, end_idx)
            .await
            .map_err(unavailable)?;

        raw.iter()
            .enumerate()
            .map(|(offset, record)| decode_record(partition, start + offset as u64, record))
            .collect()
    }
}

impl std::fmt::Debug for RedisLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisLogStore").finish_non_exhaustive()
    }
}
