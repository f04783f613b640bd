//! Best-effort asset cleanup.

use std::sync::Arc;

use vitrine_storage::AssetUploader;

/// Delete `urls` on a spawned task. The caller's mutation is already
/// committed; failures are only logged by the uploader.
pub fn spawn_asset_cleanup(uploader: Arc<AssetUploader>, urls: Vec<String>) {
    if urls.is_empty() {
        return;
    }
    tokio::spawn(async move {
        uploader.delete_all(&urls).await;
    });
}
