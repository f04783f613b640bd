//! Lead capture endpoints used by the public site forms.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::contact::{validate_email, validate_message};
use vitrine_core::timestamp::to_iso_string;
use vitrine_notify::Lead;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Conversation summary produced by the assistant widget.
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
    pub timestamp: String,
}

async fn submit_lead(
    state: &AppState,
    body: Result<Json<LeadRequest>, JsonRejection>,
    source: &'static str,
) -> AppResult<Json<LeadResponse>> {
    let Json(input) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let email = validate_email(input.email.as_deref().unwrap_or_default())?;
    let lead = Lead {
        email: email.clone(),
        name: input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        summary: validate_message(input.summary.as_deref())?,
        message: validate_message(input.message.as_deref())?,
    };

    let receipt = state.leads.send(&lead).await;
    tracing::info!(
        source,
        email = %lead.email,
        confirmation_sent = receipt.confirmation_sent,
        notification_sent = receipt.notification_sent,
        "Lead received",
    );

    Ok(Json(LeadResponse {
        success: true,
        message: "Thank you, we will get back to you shortly".into(),
        email,
        timestamp: to_iso_string(&chrono::Utc::now()),
    }))
}

/// POST /api/send-lead-email
pub async fn send_lead_email(
    State(state): State<AppState>,
    body: Result<Json<LeadRequest>, JsonRejection>,
) -> AppResult<Json<LeadResponse>> {
    submit_lead(&state, body, "assistant").await
}

/// POST /api/contact
pub async fn contact(
    State(state): State<AppState>,
    body: Result<Json<LeadRequest>, JsonRejection>,
) -> AppResult<Json<LeadResponse>> {
    submit_lead(&state, body, "contact_form").await
}
