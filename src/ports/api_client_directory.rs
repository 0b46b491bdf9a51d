//! ApiClientDirectory port - Credential checks and names for API clients.
//!
//! Token issuance lives elsewhere; the relay only verifies tokens, resolves
//! display names and enumerates clients for queue fan-out.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::chat::ChatError;
use crate::domain::foundation::TokenId;

/// Errors raised by directory adapters.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Client directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for ChatError {
    fn from(err: DirectoryError) -> Self {
        ChatError::infrastructure(err.to_string())
    }
}

/// Token pair presented by an API client.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub token_id: TokenId,
    pub token_key: SecretString,
}

impl ApiCredentials {
    pub fn new(token_id: impl Into<String>, token_key: impl Into<String>) -> Self {
        Self {
            token_id: TokenId::new(token_id),
            token_key: SecretString::new(token_key.into()),
        }
    }

    /// Hex SHA-256 of the presented key.
    pub fn key_digest(&self) -> String {
        key_digest(self.token_key.expose_secret())
    }
}

/// Port for the API client registry.
#[async_trait]
pub trait ApiClientDirectory: Send + Sync {
    /// True when the key matches the one registered for the token id.
    async fn authenticate(&self, credentials: &ApiCredentials) -> Result<bool, DirectoryError>;

    /// Display name used as the sender of the client's messages.
    async fn display_name(&self, token_id: &TokenId) -> Result<Option<String>, DirectoryError>;

    /// Every registered client, for long-poll fan-out.
    async fn token_ids(&self) -> Result<Vec<TokenId>, DirectoryError>;
}

/// Hex SHA-256 digest under which token keys are stored.
pub fn key_digest(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Constant-time comparison of two stored digests.
pub fn digests_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
