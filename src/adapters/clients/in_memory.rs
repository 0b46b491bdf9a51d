//! In-memory API client directory for tests and development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::TokenId;
use crate::ports::{digests_match, key_digest, ApiClientDirectory, ApiCredentials, DirectoryError};

#[derive(Debug, Clone)]
struct ClientRecord {
    key_digest: String,
    name: String,
}

/// Directory holding registered clients in a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientDirectory {
    clients: Arc<RwLock<HashMap<TokenId, ClientRecord>>>,
}

impl InMemoryClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client. Only the key digest is kept.
    pub async fn register(&self, token_id: impl Into<String>, name: impl Into<String>, key: &str) {
        let record = ClientRecord {
            key_digest: key_digest(key),
            name: name.into(),
        };
        self.clients
            .write()
            .await
            .insert(TokenId::new(token_id), record);
    }

    pub async fn revoke(&self, token_id: &TokenId) {
        self.clients.write().await.remove(token_id);
    }
}

#[async_trait]
impl ApiClientDirectory for InMemoryClientDirectory {
    async fn authenticate(&self, credentials: &ApiCredentials) -> Result<bool, DirectoryError> {
        let clients = self.clients.read().await;
        Ok(clients
            .get(&credentials.token_id)
            .map(|record| digests_match(&record.key_digest, &credentials.key_digest()))
            .unwrap_or(false))
    }

    async fn display_name(&self, token_id: &TokenId) -> Result<Option<String>, DirectoryError> {
        Ok(self
            .clients
            .read()
            .await
            .get(token_id)
            .map(|record| record.name.clone()))
    }

    async fn token_ids(&self) -> Result<Vec<TokenId>, DirectoryError> {
        let mut ids: Vec<_> = self.clients.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
