//! The document store seam.

use async_trait::async_trait;
use serde_json::Value;
use vitrine_core::types::{RecordId, Timestamp};

/// Error type for document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failure reported by the Postgres driver.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be reached or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A listing could not be loaded. Carries only the collection name;
    /// the underlying cause is logged where it happened.
    #[error("Failed to load {collection}")]
    LoadFailed { collection: &'static str },
}

/// A document as kept by the store.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StoredDocument {
    pub id: RecordId,
    pub data: Value,
    /// When the store first saw this document.
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A hosted-document-database style store: named collections of JSON
/// documents with store-assigned ids.
///
/// Writes replace whole documents. There is no version check, so the last
/// writer wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`, in no particular order.
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    async fn get(&self, collection: &str, id: RecordId) -> Result<Option<StoredDocument>, StoreError>;

    /// Insert a document and return its newly assigned id.
    async fn create(&self, collection: &str, data: Value) -> Result<RecordId, StoreError>;

    /// Replace a document. Returns `false` if no such document exists.
    async fn update(&self, collection: &str, id: RecordId, data: Value) -> Result<bool, StoreError>;

    /// Remove a document. Returns `false` if no such document exists.
    async fn delete(&self, collection: &str, id: RecordId) -> Result<bool, StoreError>;

    /// Read a singleton document addressed by a fixed key.
    async fn get_singleton(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Create or replace a singleton document.
    async fn put_singleton(&self, collection: &str, key: &str, data: Value) -> Result<(), StoreError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
