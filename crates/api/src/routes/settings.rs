//! Route definitions for the maintenance switches.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Public routes mounted at `/settings`.
///
/// ```text
/// GET    /{key}   -> get_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{key}", get(settings::get_setting))
}

/// Admin routes mounted at `/admin/settings`.
///
/// ```text
/// PUT    /{key}   -> update_setting
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/{key}", put(settings::update_setting))
}
