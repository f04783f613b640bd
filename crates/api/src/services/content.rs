//! Record kinds managed through the admin area.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use vitrine_core::assets::AssetKind;
use vitrine_core::audio::{AudioFields, AudioFile};
use vitrine_core::collection::Collection;
use vitrine_core::editor::Draft;
use vitrine_core::error::CoreError;
use vitrine_core::import::ImportRecord;
use vitrine_core::project::{Project, ProjectFields};
use vitrine_core::types::RecordId;
use vitrine_db::repositories::{AudioRepo, ProjectRepo, Visibility};
use vitrine_db::{DocumentStore, StoreError};

/// A record kind: its draft type, stored form, repository and upload slots.
#[async_trait]
pub trait ContentRecord:
    Draft + ImportRecord + DeserializeOwned + Send + Sync + 'static
{
    type Record: Serialize + Send + Sync;

    const COLLECTION: Collection;

    fn id(record: &Self::Record) -> RecordId;

    fn fields(record: &Self::Record) -> &Self;

    /// Upload slot for a multipart part name.
    fn slot_for_part(name: &str) -> Option<AssetKind>;

    /// Carry over stored values an edit may leave blank.
    fn inherit_from(&mut self, _existing: &Self) {}

    /// Keep the stored creation time when an edit does not set one.
    fn inherit_created_at(&mut self, existing: &Self);

    /// Check a record about to be created by the bulk importer.
    fn check_import(&self) -> Result<(), CoreError> {
        Ok(())
    }

    /// Every asset URL the record references.
    fn stored_assets(&self) -> Vec<String>;

    async fn list(
        store: &dyn DocumentStore,
        visibility: Visibility,
    ) -> Result<Vec<Self::Record>, StoreError>;

    async fn find(store: &dyn DocumentStore, id: RecordId)
        -> Result<Option<Self::Record>, StoreError>;

    async fn create(store: &dyn DocumentStore, fields: &Self) -> Result<Self::Record, StoreError>;

    async fn update(
        store: &dyn DocumentStore,
        id: RecordId,
        fields: &Self,
    ) -> Result<Option<Self::Record>, StoreError>;

    async fn delete(store: &dyn DocumentStore, id: RecordId) -> Result<bool, StoreError>;
}

#[async_trait]
impl ContentRecord for ProjectFields {
    type Record = Project;

    const COLLECTION: Collection = Collection::Projects;

    fn id(record: &Project) -> RecordId {
        record.id
    }

    fn fields(record: &Project) -> &Self {
        &record.fields
    }

    fn slot_for_part(name: &str) -> Option<AssetKind> {
        (name == "image").then_some(AssetKind::Image)
    }

    fn inherit_created_at(&mut self, existing: &Self) {
        self.created_at = existing.created_at;
    }

    fn stored_assets(&self) -> Vec<String> {
        self.asset_urls().into_iter().map(str::to_string).collect()
    }

    async fn list(
        store: &dyn DocumentStore,
        visibility: Visibility,
    ) -> Result<Vec<Project>, StoreError> {
        ProjectRepo::list(store, visibility).await
    }

    async fn find(store: &dyn DocumentStore, id: RecordId) -> Result<Option<Project>, StoreError> {
        ProjectRepo::find_by_id(store, id).await
    }

    async fn create(store: &dyn DocumentStore, fields: &Self) -> Result<Project, StoreError> {
        ProjectRepo::create(store, fields).await
    }

    async fn update(
        store: &dyn DocumentStore,
        id: RecordId,
        fields: &Self,
    ) -> Result<Option<Project>, StoreError> {
        ProjectRepo::update(store, id, fields).await
    }

    async fn delete(store: &dyn DocumentStore, id: RecordId) -> Result<bool, StoreError> {
        ProjectRepo::delete(store, id).await
    }
}

#[async_trait]
impl ContentRecord for AudioFields {
    type Record = AudioFile;

    const COLLECTION: Collection = Collection::Audio;

    fn id(record: &AudioFile) -> RecordId {
        record.id
    }

    fn fields(record: &AudioFile) -> &Self {
        &record.fields
    }

    fn slot_for_part(name: &str) -> Option<AssetKind> {
        match name {
            "file" => Some(AssetKind::Audio),
            "cover" => Some(AssetKind::Cover),
            _ => None,
        }
    }

    fn inherit_from(&mut self, existing: &Self) {
        self.inherit_file(existing);
    }

    fn inherit_created_at(&mut self, existing: &Self) {
        self.created_at = existing.created_at;
    }

    fn check_import(&self) -> Result<(), CoreError> {
        self.validate(false)
    }

    fn stored_assets(&self) -> Vec<String> {
        self.asset_urls().into_iter().map(str::to_string).collect()
    }

    async fn list(
        store: &dyn DocumentStore,
        visibility: Visibility,
    ) -> Result<Vec<AudioFile>, StoreError> {
        AudioRepo::list(store, visibility).await
    }

    async fn find(store: &dyn DocumentStore, id: RecordId) -> Result<Option<AudioFile>, StoreError> {
        AudioRepo::find_by_id(store, id).await
    }

    async fn create(store: &dyn DocumentStore, fields: &Self) -> Result<AudioFile, StoreError> {
        AudioRepo::create(store, fields).await
    }

    async fn update(
        store: &dyn DocumentStore,
        id: RecordId,
        fields: &Self,
    ) -> Result<Option<AudioFile>, StoreError> {
        AudioRepo::update(store, id, fields).await
    }

    async fn delete(store: &dyn DocumentStore, id: RecordId) -> Result<bool, StoreError> {
        AudioRepo::delete(store, id).await
    }
}
