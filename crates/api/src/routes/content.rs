//! Route definitions for the content collections.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::services::content::ContentRecord;
use crate::state::AppState;

use super::UPLOAD_BODY_LIMIT;

/// Public routes mounted at `/{collection}`.
///
/// ```text
/// GET    /        -> list_public
/// ```
pub fn public_router<R: ContentRecord>() -> Router<AppState> {
    Router::new().route("/", get(content::list_public::<R>))
}

/// Admin routes mounted at `/admin/{collection}`.
///
/// ```text
/// GET    /        -> list_all
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn admin_router<R: ContentRecord>() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_all::<R>).post(content::create::<R>))
        .route(
            "/{id}",
            get(content::get_by_id::<R>)
                .put(content::update::<R>)
                .delete(content::delete::<R>),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
