use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Mount the in-process asset route at the root, matching the public base
/// URL used when no bucket is configured.
pub fn router() -> Router<AppState> {
    Router::new().route("/assets/{*key}", get(assets::serve_local_asset))
}
