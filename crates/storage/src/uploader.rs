//! Asset uploader: policy checks, key generation and public URLs.

use std::sync::Arc;

use vitrine_core::assets::{key_from_url, storage_key, validate_upload, AssetKind};

use crate::object_store::{ObjectStore, StorageError};

/// Uploads and deletes record assets.
///
/// Uploads are validated before touching the backend. Deletes are best
/// effort: failures are logged and never returned.
#[derive(Clone)]
pub struct AssetUploader {
    store: Arc<dyn ObjectStore>,
    public_base_url: String,
}

impl AssetUploader {
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            public_base_url,
        }
    }

    /// Public URL of an object key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    /// Store an asset under the folder for `kind` and return its public URL.
    pub async fn upload(
        &self,
        kind: AssetKind,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        validate_upload(kind, bytes.len() as u64, content_type)?;

        let key = storage_key(
            kind.folder(),
            file_name,
            chrono::Utc::now().timestamp_millis(),
        );
        let size = bytes.len();
        self.store.put(&key, content_type, bytes).await?;

        tracing::info!(key = %key, size, kind = kind.label(), "Asset uploaded");
        Ok(self.public_url(&key))
    }

    /// Remove the asset a public URL points to.
    ///
    /// Empty URLs and URLs outside our public base are ignored.
    pub async fn delete(&self, url: &str) {
        if url.trim().is_empty() {
            return;
        }
        let Some(key) = key_from_url(url, &self.public_base_url) else {
            tracing::debug!(url, "Skipping delete of external asset URL");
            return;
        };
        match self.store.delete(&key).await {
            Ok(()) => tracing::info!(key = %key, "Asset deleted"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to delete asset"),
        }
    }

    /// [`AssetUploader::delete`] every URL in turn.
    pub async fn delete_all<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for url in urls {
            self.delete(url.as_ref()).await;
        }
    }
}
