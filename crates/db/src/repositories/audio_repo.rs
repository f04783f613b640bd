//! Repository for the `audio` collection.

use vitrine_core::audio::{AudioFields, AudioFile};
use vitrine_core::collection::COLLECTION_AUDIO;
use vitrine_core::schema::{audio_from_document, audio_to_document};
use vitrine_core::types::RecordId;

use super::{load_failed, Visibility};
use crate::store::{DocumentStore, StoreError, StoredDocument};

/// Provides CRUD operations for audio files.
pub struct AudioRepo;

fn to_audio(doc: &StoredDocument) -> Option<AudioFile> {
    match audio_from_document(doc.id, &doc.data, doc.created_at) {
        Ok(audio) => Some(audio),
        Err(e) => {
            tracing::warn!(id = %doc.id, error = %e, "Skipping unreadable audio document");
            None
        }
    }
}

impl AudioRepo {
    /// List audio files, newest first.
    ///
    /// Any store failure is reported as [`StoreError::LoadFailed`].
    pub async fn list(
        store: &dyn DocumentStore,
        visibility: Visibility,
    ) -> Result<Vec<AudioFile>, StoreError> {
        let docs = store
            .list(COLLECTION_AUDIO)
            .await
            .map_err(|e| load_failed(COLLECTION_AUDIO, e))?;

        let mut audio: Vec<AudioFile> = docs
            .iter()
            .filter_map(to_audio)
            .filter(|a| visibility == Visibility::All || a.is_public())
            .collect();
        audio.sort_by(|a, b| b.fields.created_at.cmp(&a.fields.created_at));
        Ok(audio)
    }

    /// Find an audio file by id.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: RecordId,
    ) -> Result<Option<AudioFile>, StoreError> {
        let doc = store.get(COLLECTION_AUDIO, id).await?;
        Ok(doc.as_ref().and_then(to_audio))
    }

    /// Insert a new audio file, returning the stored record.
    pub async fn create(
        store: &dyn DocumentStore,
        fields: &AudioFields,
    ) -> Result<AudioFile, StoreError> {
        let id = store
            .create(COLLECTION_AUDIO, audio_to_document(fields))
            .await?;
        Ok(AudioFile {
            id,
            fields: fields.clone(),
        })
    }

    /// Replace an audio file. Returns `None` if no audio file with `id` exists.
    pub async fn update(
        store: &dyn DocumentStore,
        id: RecordId,
        fields: &AudioFields,
    ) -> Result<Option<AudioFile>, StoreError> {
        let updated = store
            .update(COLLECTION_AUDIO, id, audio_to_document(fields))
            .await?;
        Ok(updated.then(|| AudioFile {
            id,
            fields: fields.clone(),
        }))
    }

    /// Delete an audio file. Returns `true` if a document was removed.
    pub async fn delete(store: &dyn DocumentStore, id: RecordId) -> Result<bool, StoreError> {
        store.delete(COLLECTION_AUDIO, id).await
    }
}
