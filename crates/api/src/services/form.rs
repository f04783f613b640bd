//! Multipart record forms.
//!
//! A form carries one `record` part holding the draft as JSON and at most
//! one file part per upload slot of the record kind.

use axum::extract::Multipart;
use serde_json::Value;
use vitrine_core::assets::AssetKind;

use super::content::ContentRecord;
use crate::error::{AppError, AppResult};

/// Part holding the JSON draft.
pub const RECORD_PART: &str = "record";

/// A file received for one upload slot.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub kind: AssetKind,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A decoded record form.
#[derive(Debug)]
pub struct RecordForm<R> {
    pub draft: R,
    pub uploads: Vec<PendingUpload>,
    /// Whether the draft JSON set `createdAt`. When it did not, an update
    /// keeps the stored creation time.
    pub has_created_at: bool,
}

impl<R> RecordForm<R> {
    /// Slots that carry an upload with this form.
    pub fn pending_slots(&self) -> Vec<AssetKind> {
        self.uploads.iter().map(|u| u.kind).collect()
    }
}

/// Read a record form from a multipart body.
///
/// Unknown parts are ignored. Empty file parts count as "no upload", which
/// is what browsers send for an untouched file input.
pub async fn read_record_form<R: ContentRecord>(mut multipart: Multipart) -> AppResult<RecordForm<R>> {
    let mut draft: Option<R> = None;
    let mut has_created_at = false;
    let mut uploads: Vec<PendingUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == RECORD_PART {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            let value = serde_json::from_str::<Value>(&text)
                .map_err(|e| AppError::BadRequest(format!("Invalid record: {e}")))?;
            has_created_at = value.get("createdAt").is_some_and(|v| !v.is_null());
            let parsed = serde_json::from_value::<R>(value)
                .map_err(|e| AppError::BadRequest(format!("Invalid record: {e}")))?;
            draft = Some(parsed);
            continue;
        }

        let Some(kind) = R::slot_for_part(&name) else {
            tracing::debug!(part = %name, "Ignoring unknown form part");
            continue;
        };
        if uploads.iter().any(|u| u.kind == kind) {
            return Err(AppError::BadRequest(format!(
                "Only one '{name}' file may be uploaded per save"
            )));
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if bytes.is_empty() {
            continue;
        }

        uploads.push(PendingUpload {
            kind,
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let draft = draft.ok_or_else(|| {
        AppError::BadRequest(format!("Missing '{RECORD_PART}' part in form"))
    })?;
    Ok(RecordForm {
        draft,
        uploads,
        has_created_at,
    })
}
