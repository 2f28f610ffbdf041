//! Store seam
//!
//! The repository talks to the key-value store only through [`HashStore`].
//! Implementations must make `insert_hash`, `replace_hash` and `replace_list`
//! atomic on their own key; nothing spans more than one call. Hashes, lists
//! and indexes share one key space, as in Redis.

use async_trait::async_trait;
use thiserror::Error;

use crate::codec::FlatMap;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("timed out after {0}s connecting to the store")]
    Timeout(u64),

    #[error("failed to serialize store value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("key `{0}` holds a value of another type")]
    WrongType(String),
}

#[async_trait]
pub trait HashStore: Send + Sync {
    /// Whether anything lives at `key`.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// All fields of the hash at `key`; empty when the key is absent.
    async fn read_hash(&self, key: &str) -> Result<FlatMap, StoreError>;

    /// Writes `fields` at `key` unless the key already exists. Returns whether
    /// the hash was written.
    async fn insert_hash(&self, key: &str, fields: &FlatMap) -> Result<bool, StoreError>;

    /// Replaces the hash at `key` so it holds exactly `fields`.
    async fn replace_hash(&self, key: &str, fields: &FlatMap) -> Result<(), StoreError>;

    /// Every element of the list at `key`, in order.
    async fn read_list(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// Replaces the list at `key` so it holds exactly `items`.
    async fn replace_list(&self, key: &str, items: &[String]) -> Result<(), StoreError>;

    /// Removes `keys`, returning how many existed.
    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError>;

    async fn index_add(&self, index: &str, member: &str, score: f64) -> Result<(), StoreError>;

    async fn index_remove(&self, index: &str, member: &str) -> Result<(), StoreError>;

    /// Members scored at or above `min_score`, ordered by score then member.
    async fn index_range(
        &self,
        index: &str,
        min_score: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Vec<String>, StoreError>;
}
