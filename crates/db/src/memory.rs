//! In-process document store for local development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use vitrine_core::types::RecordId;

use crate::store::{DocumentStore, StoreError, StoredDocument};

#[derive(Default)]
struct Inner {
    documents: HashMap<String, HashMap<RecordId, StoredDocument>>,
    singletons: HashMap<(String, String), Value>,
}

/// [`DocumentStore`] kept in memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document verbatim, bypassing id assignment. Used to seed
    /// legacy-shaped data.
    pub async fn insert_raw(&self, collection: &str, document: StoredDocument) {
        let mut inner = self.inner.write().await;
        inner
            .documents
            .entry(collection.to_string())
            .or_default()
            .insert(document.id, document);
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        let inner = self.inner.read().await;
        inner.documents.get(collection).map_or(0, HashMap::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .documents
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: RecordId) -> Result<Option<StoredDocument>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .documents
            .get(collection)
            .and_then(|docs| docs.get(&id))
            .cloned())
    }

    async fn create(&self, collection: &str, data: Value) -> Result<RecordId, StoreError> {
        let id = uuid::Uuid::now_v7();
        let now = chrono::Utc::now();
        self.insert_raw(
            collection,
            StoredDocument {
                id,
                data,
                created_at: now,
                updated_at: now,
            },
        )
        .await;
        Ok(id)
    }

    async fn update(&self, collection: &str, id: RecordId, data: Value) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(doc) = inner
            .documents
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(&id))
        else {
            return Ok(false);
        };
        doc.data = data;
        doc.updated_at = chrono::Utc::now();
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: RecordId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .documents
            .get_mut(collection)
            .and_then(|docs| docs.remove(&id))
            .is_some())
    }

    async fn get_singleton(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .singletons
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }

    async fn put_singleton(&self, collection: &str, key: &str, data: Value) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .singletons
            .insert((collection.to_string(), key.to_string()), data);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
