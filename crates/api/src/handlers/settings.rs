//! Handlers for the maintenance switches.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use vitrine_core::settings::{MaintenanceSetting, SettingKey};
use vitrine_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    pub enabled: bool,
}

/// GET /api/v1/settings/{key}
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<DataResponse<MaintenanceSetting>>> {
    let key = SettingKey::parse(&key)?;
    let setting = SettingsRepo::get(state.store.as_ref(), key).await?;
    Ok(Json(DataResponse { data: setting }))
}

/// PUT /api/v1/admin/settings/{key}
pub async fn update_setting(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpdateSettingRequest>,
) -> AppResult<Json<DataResponse<MaintenanceSetting>>> {
    let key = SettingKey::parse(&key)?;
    let setting = MaintenanceSetting {
        enabled: input.enabled,
        updated_at: Some(chrono::Utc::now()),
        updated_by: Some(admin.label().to_string()),
    };
    SettingsRepo::set(state.store.as_ref(), key, &setting).await?;

    tracing::info!(key = key.as_str(), enabled = setting.enabled, by = %admin.label(), "Setting updated");
    Ok(Json(DataResponse { data: setting }))
}
