//! Handler for collection exports.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use vitrine_core::collection::{Collection, EXPORT_ALL};
use vitrine_core::export::export_filename;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::services::export::export;
use crate::state::AppState;

/// GET /api/v1/admin/export/{collection|all}
///
/// Pretty-printed JSON delivered as an attachment.
pub async fn export_collection(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let collection = if name == EXPORT_ALL {
        None
    } else {
        Some(Collection::parse(&name)?)
    };

    let document = export(state.store.as_ref(), collection, admin.label()).await?;
    let body = serde_json::to_string_pretty(&document)
        .map_err(|e| AppError::InternalError(format!("Failed to encode export: {e}")))?;
    let filename = export_filename(collection, &chrono::Utc::now());

    tracing::info!(collection = %name, by = %admin.label(), bytes = body.len(), "Export generated");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/json; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        body,
    ))
}
