//! Redis-backed API client directory.
//!
//! Two hashes, both keyed by token id:
//! - `fishroom:api:tokens` holds the hex SHA-256 of each client's key
//! - `fishroom:api:names` holds display names

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::TokenId;
use crate::ports::{digests_match, key_digest, ApiClientDirectory, ApiCredentials, DirectoryError};

pub const TOKENS_KEY: &str = "fishroom:api:tokens";
pub const NAMES_KEY: &str = "fishroom:api:names";

#[derive(Clone)]
pub struct RedisClientDirectory {
    conn: MultiplexedConnection,
}

impl RedisClientDirectory {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Store a client record. Used by provisioning tooling and tests.
    pub async fn register(
        &self,
        token_id: &TokenId,
        name: &str,
        key: &str,
    ) -> Result<(), DirectoryError> {
        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .hset(TOKENS_KEY, token_id.as_str(), key_digest(key))
            .ignore()
            .hset(NAMES_KEY, token_id.as_str(), name)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)
    }
}

fn unavailable(e: redis::RedisError) -> DirectoryError {
    DirectoryError::Unavailable(e.to_string())
}

#[async_trait]
impl ApiClientDirectory for RedisClientDirectory {
    async fn authenticate(&self, credentials: &ApiCredentials) -> Result<bool, DirectoryError> {
        let mut conn = self.conn.clone();
        let stored: Option<String> = conn
            .hget(TOKENS_KEY, credentials.token_id.as_str())
            .await
            .map_err(unavailable)?;

        Ok(stored
            .map(|digest| digests_match(&digest, &credentials.key_digest()))
            .unwrap_or(false))
    }

    async fn display_name(&self, token_id: &TokenId) -> Result<Option<String>, DirectoryError> {
        let mut conn = self.conn.clone();
        conn.hget(NAMES_KEY, token_id.as_str())
            .await
            .map_err(unavailable)
    }

    async fn token_ids(&self) -> Result<Vec<TokenId>, DirectoryError> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.hkeys(TOKENS_KEY).await.map_err(unavailable)?;
        Ok(ids.into_iter().map(TokenId::new).collect())
    }
}

impl std::fmt::Debug for RedisClientDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClientDirectory").finish_non_exhaustive()
    }
}
