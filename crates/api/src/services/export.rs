//! Collection dumps.

use chrono::Utc;
use serde_json::Value;
use vitrine_core::collection::Collection;
use vitrine_core::export::{export_all, export_collection, ExportDocument};
use vitrine_db::{DocumentStore, StoreError};

/// Raw documents of one collection, newest first.
async fn load_documents(
    store: &dyn DocumentStore,
    collection: Collection,
) -> Result<Vec<ExportDocument>, StoreError> {
    let mut docs = store.list(collection.as_str()).await.map_err(|e| {
        tracing::error!(collection = %collection, error = %e, "Export read failed");
        StoreError::LoadFailed {
            collection: collection.as_str(),
        }
    })?;
    docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(docs
        .into_iter()
        .map(|d| ExportDocument {
            id: d.id,
            data: d.data,
        })
        .collect())
}

/// Export one collection, or every collection when `collection` is `None`.
///
/// Any read failure fails the whole export.
pub async fn export(
    store: &dyn DocumentStore,
    collection: Option<Collection>,
    exported_by: &str,
) -> Result<Value, StoreError> {
    let now = Utc::now();
    match collection {
        Some(collection) => {
            let docs = load_documents(store, collection).await?;
            Ok(export_collection(collection, exported_by, &now, docs))
        }
        None => {
            let mut sections = Vec::with_capacity(Collection::ALL.len());
            for collection in Collection::ALL {
                sections.push((collection, load_documents(store, collection).await?));
            }
            Ok(export_all(exported_by, &now, sections))
        }
    }
}
