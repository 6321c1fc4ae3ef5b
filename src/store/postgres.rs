use async_trait::async_trait;

use serde_json::Value;

use sqlx::PgPool;

use super::{NotificationStore, StoreError};

/// Store backed by the `kv_store` table
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgStore {
    #[tracing::instrument(name = "Put a record", skip(self, value))]
    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        sqlx::query(
            "insert into kv_store(key, value) values ($1, $2)
             on conflict (key) do update set value = excluded.value, updated_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[tracing::instrument(name = "Get a record", skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let value = sqlx::query_scalar::<_, Value>("select value from kv_store where key=$1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    #[tracing::instrument(name = "Scan records by prefix", skip(self))]
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            "select key, value from kv_store where starts_with(key, $1) order by key",
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[tracing::instrument(name = "Delete a record", skip(self))]
    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("delete from kv_store where key=$1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
