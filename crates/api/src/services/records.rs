//! Saving and deleting records.
//!
//! A save drives one [`Editor`] through its states for the duration of a
//! request: the submitted draft is validated before any network call, each
//! upload slot is filled in turn, and the record is written as a whole.

use vitrine_core::assets::validate_upload;
use vitrine_core::editor::{Draft, Editor, SaveRequest};
use vitrine_core::error::CoreError;
use vitrine_core::types::RecordId;

use super::cleanup::spawn_asset_cleanup;
use super::content::ContentRecord;
use super::form::RecordForm;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found<R: ContentRecord>(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id: id.to_string(),
    })
}

/// Create (`target == None`) or replace a record from a submitted form.
///
/// Failed uploads in a critical slot abort the save; other slots keep
/// their previous asset. Once an update is written, every asset the old
/// record referenced and the new one no longer does is deleted in the
/// background.
pub async fn save_record<R: ContentRecord>(
    state: &AppState,
    target: Option<RecordId>,
    form: RecordForm<R>,
) -> AppResult<R::Record> {
    let store = state.store.as_ref();
    let mut editor = Editor::<R>::new();

    let existing = match target {
        Some(id) => {
            let record = R::find(store, id).await?.ok_or_else(|| not_found::<R>(id))?;
            editor.open_existing(id, R::fields(&record));
            Some(record)
        }
        None => {
            editor.open_new();
            None
        }
    };

    let pending = form.pending_slots();
    let RecordForm {
        mut draft,
        uploads,
        has_created_at,
    } = form;
    if let Some(record) = &existing {
        draft.inherit_from(R::fields(record));
        if !has_created_at {
            draft.inherit_created_at(R::fields(record));
        }
    }
    editor.edit(|d| *d = draft)?;

    let SaveRequest { mut draft, target } = editor.begin_save(&pending)?;
    let is_new = target.is_none();

    for upload in &uploads {
        if let Err(e) = validate_upload(upload.kind, upload.bytes.len() as u64, &upload.content_type) {
            editor.finish_save(Err(e.to_string()));
            return Err(e.into());
        }
    }

    let mut uploaded: Vec<String> = Vec::new();

    for upload in uploads {
        let kind = upload.kind;
        match state
            .uploader
            .upload(kind, &upload.file_name, &upload.content_type, upload.bytes)
            .await
        {
            Ok(url) => {
                draft.set_asset_url(kind, url.clone());
                uploaded.push(url);
            }
            Err(e) if kind.is_critical(is_new) => {
                tracing::error!(entity = R::ENTITY, slot = kind.label(), error = %e, "Upload failed, aborting save");
                editor.finish_save(Err(e.to_string()));
                spawn_asset_cleanup(state.uploader.clone(), uploaded);
                return Err(e.into());
            }
            Err(e) => {
                tracing::warn!(entity = R::ENTITY, slot = kind.label(), error = %e, "Upload failed, keeping previous asset");
            }
        }
    }

    let written = match target {
        None => R::create(store, &draft).await.map_err(AppError::from),
        Some(id) => R::update(store, id, &draft)
            .await
            .map_err(AppError::from)
            .and_then(|record| record.ok_or_else(|| not_found::<R>(id))),
    };

    let record = match written {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(collection = %R::COLLECTION, error = %e, "Failed to save record");
            editor.finish_save(Err(e.to_string()));
            spawn_asset_cleanup(state.uploader.clone(), uploaded);
            return Err(e);
        }
    };

    let id = R::id(&record);
    editor.finish_save(Ok(id));
    if let Some(previous) = &existing {
        let orphaned = orphaned_assets(R::fields(previous), R::fields(&record));
        spawn_asset_cleanup(state.uploader.clone(), orphaned);
    }

    tracing::info!(collection = %R::COLLECTION, id = %id, created = is_new, "Record saved");
    Ok(record)
}

/// Assets `before` referenced that `after` dropped.
fn orphaned_assets<R: ContentRecord>(before: &R, after: &R) -> Vec<String> {
    let kept = after.stored_assets();
    let mut orphaned: Vec<String> = before
        .stored_assets()
        .into_iter()
        .filter(|url| !kept.contains(url))
        .collect();
    orphaned.sort();
    orphaned.dedup();
    orphaned
}

/// Delete a record, then clean up its assets in the background.
///
/// The deletion stands whatever happens to the cleanup.
pub async fn delete_record<R: ContentRecord>(state: &AppState, id: RecordId) -> AppResult<()> {
    let store = state.store.as_ref();
    let existing = R::find(store, id).await?.ok_or_else(|| not_found::<R>(id))?;

    if !R::delete(store, id).await? {
        return Err(not_found::<R>(id));
    }
    tracing::info!(collection = %R::COLLECTION, id = %id, "Record deleted");

    spawn_asset_cleanup(state.uploader.clone(), R::fields(&existing).stored_assets());
    Ok(())
}
