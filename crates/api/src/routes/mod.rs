pub mod admin;
pub mod assets;
pub mod content;
pub mod health;
pub mod settings;
pub mod site;

use axum::Router;
use vitrine_core::audio::AudioFields;
use vitrine_core::project::ProjectFields;

use crate::state::AppState;

/// Largest request body accepted by upload and import routes. Sized for the
/// biggest asset (audio, 50 MB) plus the rest of the form.
pub const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                  public listing (not archived)
/// /audio                                     public listing (published)
/// /settings/{key}                            read a maintenance switch
///
/// /admin/projects                            list all, create (multipart)
/// /admin/projects/{id}                       get, update (multipart), delete
/// /admin/audio                               list all, create (multipart)
/// /admin/audio/{id}                          get, update (multipart), delete
/// /admin/settings/{key}                      set a maintenance switch (PUT)
/// /admin/export/{collection|all}             download export (GET)
/// /admin/import/{collection}                 run import (POST)
/// /admin/import/{collection}/preview         parse and normalize (POST)
/// /admin/import/{collection}/template        download template (GET)
/// ```
///
/// Everything under `/admin` requires an admin bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", content::public_router::<ProjectFields>())
        .nest("/audio", content::public_router::<AudioFields>())
        .nest("/settings", settings::router())
        .nest("/admin", admin::router())
}
