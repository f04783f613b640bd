//! Serving assets kept in process.

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use vitrine_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /assets/{*key}
///
/// Only answers when assets live in memory; with a bucket configured the
/// public URLs point at the bucket and every key here is a 404.
pub async fn serve_local_asset(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let object = match &state.local_assets {
        Some(objects) => objects.get(&key).await,
        None => None,
    };
    let object = object.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: key,
        })
    })?;

    Ok(([(CONTENT_TYPE, object.content_type)], object.bytes))
}
