//! Endpoints called by the public site, mounted at the root.

use axum::routing::post;
use axum::Router;

use crate::handlers::{chat, contact};
use crate::state::AppState;

/// ```text
/// POST   /api/chat              -> chat
/// POST   /api/send-lead-email   -> send_lead_email
/// POST   /api/contact           -> contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/send-lead-email", post(contact::send_lead_email))
        .route("/api/contact", post(contact::contact))
}
