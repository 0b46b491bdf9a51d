//! Redis-backed long-poll queues.
//!
//! Queue contents live in a list per client. BLPOP blocks its connection,
//! so waits run on a dedicated connection rather than the shared
//! multiplexed one.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::TokenId;
use crate::ports::{PollQueue, QueueError};

const QUEUE_KEY_PREFIX: &str = "fishroom:api:queue";

/// Redis key of a client's poll queue.
pub fn queue_key(token: &TokenId) -> String {
    format!("{}:{}", QUEUE_KEY_PREFIX, token)
}

/// Smallest server-side BLPOP timeout; BLPOP treats 0 as "forever".
const MIN_BLPOP_SECS: f64 = 0.01;

/// Server-side BLPOP timeout for a wait of `timeout`.
fn blpop_timeout_secs(timeout: Duration) -> f64 {
    timeout.as_secs_f64().max(MIN_BLPOP_SECS)
}

/// Redis-backed poll queue.
#[derive(Clone)]
pub struct RedisPollQueue {
    client: redis::Client,
    conn: MultiplexedConnection,
}

impl RedisPollQueue {
    pub fn new(client: redis::Client, conn: MultiplexedConnection) -> Self {
        Self { client, conn }
    }
}

fn unavailable(e: redis::RedisError) -> QueueError {
    QueueError::Unavailable(e.to_string())
}

#[async_trait]
impl PollQueue for RedisPollQueue {
    async fn enqueue(&self, token: &TokenId, payload: &str) -> Result<(), QueueError> {
        let mut conn = self.conn.clone();
        let _: u64 = conn.rpush(queue_key(token), payload).await.map_err(unavailable)?;
        Ok(())
    }

    async fn len(&self, token: &TokenId) -> Result<u64, QueueError> {
        let mut conn = self.conn.clone();
        conn.llen(queue_key(token)).await.map_err(unavailable)
    }

    async fn drain(&self, token: &TokenId) -> Result<Vec<String>, QueueError> {
        let key = queue_key(token);
        let mut conn = self.conn.clone();
        let (entries,): (Vec<String>,) = redis::pipe()
            .atomic()
            .lrange(&key, 0, -1)
            .del(&key)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(entries)
    }

    async fn wait_next(
        &self,
        token: &TokenId,
        timeout: Duration,
    ) -> Result<Option<String>, QueueError> {
        let secs = blpop_timeout_secs(timeout);
        let mut conn = self
            .client
            .get_async_connection()
            .await
            .map_err(unavailable)?;

        let pop = conn.blpop::<_, Option<(String, String)>>(queue_key(token), secs);
        match tokio::time::timeout(timeout + Duration::from_secs(1), pop).await {
            Ok(result) => Ok(result.map_err(unavailable)?.map(|(_, entry)| entry)),
            Err(_) => {
                tracing::warn!(token_id = %token, "BLPOP overran its timeout");
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for RedisPollQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPollQueue").finish_non_exhaustive()
    }
}
