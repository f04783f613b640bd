//! Route definitions for the `/admin` area.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use vitrine_core::audio::AudioFields;
use vitrine_core::project::ProjectFields;

use crate::handlers::{export, import};
use crate::state::AppState;

use super::{content, settings, UPLOAD_BODY_LIMIT};

/// Routes mounted at `/admin`.
///
/// ```text
/// /projects...                          -> content::admin_router
/// /audio...                             -> content::admin_router
/// /settings/{key}                       -> settings::admin_router
///
/// GET    /export/{collection}           -> export_collection
/// POST   /import/{collection}           -> run
/// POST   /import/{collection}/preview   -> preview
/// GET    /import/{collection}/template  -> template
/// ```
pub fn router() -> Router<AppState> {
    let import_routes = Router::new()
        .route("/{collection}", post(import::run))
        .route("/{collection}/preview", post(import::preview))
        .route("/{collection}/template", get(import::template))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    Router::new()
        .nest("/projects", content::admin_router::<ProjectFields>())
        .nest("/audio", content::admin_router::<AudioFields>())
        .nest("/settings", settings::admin_router())
        .route("/export/{collection}", get(export::export_collection))
        .nest("/import", import_routes)
}
