//! Handlers for the bulk JSON importer.
//!
//! Input is either a multipart upload (part `file`) or the raw JSON body.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use vitrine_core::audio::AudioFields;
use vitrine_core::collection::Collection;
use vitrine_core::import::{audio_template, project_template, ImportReport};
use vitrine_core::project::ProjectFields;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::services::import::{preview_import, run_import};
use crate::state::AppState;

const FILE_PART: &str = "file";

async fn read_import_input(state: &AppState, request: Request) -> AppResult<String> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if field.name() == Some(FILE_PART) {
                return field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()));
            }
        }
        return Err(AppError::BadRequest(format!(
            "Missing '{FILE_PART}' part in upload"
        )));
    }

    let bytes = Bytes::from_request(request, state)
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| AppError::BadRequest("Import file must be UTF-8 text".into()))
}

/// POST /api/v1/admin/import/{collection}/preview
///
/// Parse and normalize without writing anything.
pub async fn preview(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: Request,
) -> AppResult<Json<DataResponse<Value>>> {
    let collection = Collection::parse(&name)?;
    let input = read_import_input(&state, request).await?;

    let records = match collection {
        Collection::Projects => serde_json::to_value(preview_import::<ProjectFields>(&input)?),
        Collection::Audio => serde_json::to_value(preview_import::<AudioFields>(&input)?),
    }
    .map_err(|e| AppError::InternalError(format!("Failed to encode preview: {e}")))?;

    Ok(Json(DataResponse { data: records }))
}

/// POST /api/v1/admin/import/{collection}
///
/// Creates every record in input order. Per-item failures are reported,
/// not raised.
pub async fn run(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: Request,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let collection = Collection::parse(&name)?;
    let input = read_import_input(&state, request).await?;
    tracing::debug!(collection = %collection, by = %admin.label(), bytes = input.len(), "Import requested");

    let report = match collection {
        Collection::Projects => run_import::<ProjectFields>(state.store.as_ref(), &input).await?,
        Collection::Audio => run_import::<AudioFields>(state.store.as_ref(), &input).await?,
    };
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/admin/import/{collection}/template
pub async fn template(
    RequireAdmin(_admin): RequireAdmin,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let collection = Collection::parse(&name)?;
    let template = match collection {
        Collection::Projects => project_template(),
        Collection::Audio => audio_template(),
    };
    let body = serde_json::to_string_pretty(&template)
        .map_err(|e| AppError::InternalError(format!("Failed to encode template: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/json; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"template-{collection}.json\""),
            ),
        ],
        body,
    ))
}
