mod memory;
mod postgres;

use async_trait::async_trait;

use serde_json::Value;

use thiserror::Error;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable key-value persistence for exam and notification records.
///
/// Keys are plain strings laid out so that related records share a prefix
/// (`exam:<id>`, `notification:<examId>-<kind>`); values are JSON documents.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Insert or overwrite the record stored under `key`
    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// All records whose key starts with `prefix`, ordered by key
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError>;

    /// Remove the record under `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
