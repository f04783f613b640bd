use std::sync::Arc;

use vitrine_assistant::ChatBackend;
use vitrine_db::DocumentStore;
use vitrine_notify::LeadMailer;
use vitrine_storage::{AssetUploader, MemoryObjectStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store holding the content collections and settings.
    pub store: Arc<dyn DocumentStore>,
    /// Asset uploads and best-effort cleanup.
    pub uploader: Arc<AssetUploader>,
    /// In-process asset store, set when no bucket is configured. Its
    /// objects are served under `/assets`.
    pub local_assets: Option<Arc<MemoryObjectStore>>,
    /// Lead and contact emails.
    pub leads: Arc<LeadMailer>,
    /// Chat assistant backend.
    pub chat: Arc<dyn ChatBackend>,
    pub config: Arc<ServerConfig>,
}
