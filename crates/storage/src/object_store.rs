//! The object storage seam.

use async_trait::async_trait;
use vitrine_core::error::CoreError;

/// Error type for asset storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The upload was refused before any network call (size, type, empty).
    #[error("{0}")]
    Rejected(String),

    /// The backend failed to store or remove an object.
    #[error("Object storage error: {0}")]
    Backend(String),
}

impl From<CoreError> for StorageError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Rejected(msg),
            other => Self::Rejected(other.to_string()),
        }
    }
}

/// A flat key/value blob store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing object.
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Remove the object under `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
