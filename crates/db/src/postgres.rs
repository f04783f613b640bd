//! Postgres-backed document store. Each document is one JSONB row.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use vitrine_core::types::RecordId;

use crate::store::{DocumentStore, StoreError, StoredDocument};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, data, created_at, updated_at";

/// [`DocumentStore`] over the `documents` and `singletons` tables.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE collection = $1");
        let rows = sqlx::query_as::<_, StoredDocument>(&query)
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, collection: &str, id: RecordId) -> Result<Option<StoredDocument>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        let row = sqlx::query_as::<_, StoredDocument>(&query)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, collection: &str, data: Value) -> Result<RecordId, StoreError> {
        let id = uuid::Uuid::now_v7();
        sqlx::query("INSERT INTO documents (id, collection, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(&data)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, collection: &str, id: RecordId, data: Value) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET data = $3, updated_at = NOW()
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(&data)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: RecordId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_singleton(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let row: Option<(Value,)> =
            sqlx::query_as("SELECT data FROM singletons WHERE collection = $1 AND key = $2")
                .bind(collection)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(data,)| data))
    }

    async fn put_singleton(&self, collection: &str, key: &str, data: Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO singletons (collection, key, data) VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT pk_singletons
             DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()",
        )
        .bind(collection)
        .bind(key)
        .bind(&data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
