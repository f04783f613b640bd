//! Handlers for the content collections (projects and audio files).
//!
//! Every handler is generic over the record kind; the routes instantiate
//! them for [`ProjectFields`](vitrine_core::project::ProjectFields) and
//! [`AudioFields`](vitrine_core::audio::AudioFields).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use vitrine_core::editor::Draft;
use vitrine_core::error::CoreError;
use vitrine_core::types::RecordId;
use vitrine_db::repositories::Visibility;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::services::content::ContentRecord;
use crate::services::form::read_record_form;
use crate::services::records::{delete_record, save_record};
use crate::state::AppState;

/// GET /api/v1/{collection}
///
/// What the public site shows: projects that are not archived, audio
/// files that are published. Newest first.
pub async fn list_public<R: ContentRecord>(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<R::Record>>>> {
    let records = R::list(state.store.as_ref(), Visibility::Public).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/admin/{collection}
pub async fn list_all<R: ContentRecord>(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<R::Record>>>> {
    let records = R::list(state.store.as_ref(), Visibility::All).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/admin/{collection}/{id}
pub async fn get_by_id<R: ContentRecord>(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<R::Record>>> {
    let record = R::find(state.store.as_ref(), id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: R::ENTITY,
                id: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/admin/{collection}
///
/// Multipart form: `record` (JSON draft) plus optional file parts.
pub async fn create<R: ContentRecord>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<R::Record>>)> {
    let form = read_record_form::<R>(multipart).await?;
    let record = save_record(&state, None, form).await?;
    tracing::debug!(by = %admin.label(), entity = R::ENTITY, "Record created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/v1/admin/{collection}/{id}
pub async fn update<R: ContentRecord>(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<R::Record>>> {
    let form = read_record_form::<R>(multipart).await?;
    let record = save_record(&state, Some(id), form).await?;
    tracing::debug!(by = %admin.label(), entity = R::ENTITY, id = %id, "Record updated");
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/admin/{collection}/{id}
pub async fn delete<R: ContentRecord>(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    delete_record::<R>(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
