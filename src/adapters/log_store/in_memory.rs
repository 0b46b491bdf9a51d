//! In-memory chat log.
//!
//! Stores serialized records, exactly like the Redis adapter, so decode
//! failures behave the same in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::chat::Message;
use crate::domain::chatlog::LogPartition;
use crate::ports::{decode_record, LogStore, LogStoreError};

/// In-memory storage for log partitions, keyed by partition key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogStore {
    partitions: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw record, bypassing serialization (for corruption tests).
    pub async fn append_raw(&self, partition: &LogPartition, raw: impl Into<String>) -> u64 {
        let mut partitions = self.partitions.write().await;
        let entries = partitions.entry(partition.key()).or_default();
        entries.push(raw.into());
        (entries.len() - 1) as u64
    }

    /// Number of non-empty partitions.
    pub async fn partition_count(&self) -> usize {
        self.partitions.read().await.len()
    }
}

#[async_trait]
impl LogStore for InMemoryLogStore {
    async fn append(
        &self,
        partition: &LogPartition,
        message: &Message,
    ) -> Result<u64, LogStoreError> {
        let raw = message
            .to_json()
            .map_err(|e| LogStoreError::Encode(e.to_string()))?;
        Ok(self.append_raw(partition, raw).await)
    }

    async fn length(&self, partition: &LogPartition) -> Result<u64, LogStoreError> {
        Ok(self
            .partitions
            .read()
            .await
            .get(&partition.key())
            .map(|entries| entries.len() as u64)
            .unwrap_or(0))
    }

    async fn range(
        &self,
        partition: &LogPartition,
        start: u64,
        end: u64,
    ) -> Result<Vec<Message>, LogStoreError> {
        let partitions = self.partitions.read().await;
        let Some(entries) = partitions.get(&partition.key()) else {
            return Ok(Vec::new());
        };
        let len = entries.len() as u64;
        if start > end || start >= len {
            return Ok(Vec::new());
        }
        let end = end.min(len - 1);

        (start..=end)
            .map(|index| decode_record(partition, index, &entries[index as usize]))
            .collect()
    }
}
