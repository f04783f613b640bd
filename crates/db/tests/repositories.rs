//! Repository behaviour against the in-memory document store.
//!
//! - Public listings filter by status and sort newest first
//! - Legacy-shaped documents are migrated on read
//! - Missing records and settings have well-defined results

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use vitrine_core::audio::{AudioFields, AudioStatus};
use vitrine_core::collection::{COLLECTION_AUDIO, COLLECTION_PROJECTS};
use vitrine_core::project::{ProjectFields, ProjectStatus};
use vitrine_core::settings::{MaintenanceSetting, SettingKey};
use vitrine_db::repositories::{AudioRepo, ProjectRepo, SettingsRepo, Visibility};
use vitrine_db::{DocumentStore, MemoryDocumentStore, StoreError, StoredDocument};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn project(title: &str, status: ProjectStatus, days_ago: i64) -> ProjectFields {
    ProjectFields {
        title: title.to_string(),
        description: format!("{title} description"),
        status,
        created_at: Utc::now() - Duration::days(days_ago),
        ..Default::default()
    }
}

fn audio(title: &str, status: AudioStatus) -> AudioFields {
    AudioFields {
        title: title.to_string(),
        file_url: format!("https://cdn.test/audio/{title}.mp3"),
        status,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn public_listing_hides_archived_and_sorts_newest_first() {
    let store = MemoryDocumentStore::new();
    ProjectRepo::create(&store, &project("Old", ProjectStatus::Completed, 30))
        .await
        .unwrap();
    ProjectRepo::create(&store, &project("New", ProjectStatus::InProgress, 1))
        .await
        .unwrap();
    ProjectRepo::create(&store, &project("Gone", ProjectStatus::Archived, 5))
        .await
        .unwrap();

    let public = ProjectRepo::list(&store, Visibility::Public).await.unwrap();
    let titles: Vec<_> = public.iter().map(|p| p.fields.title.as_str()).collect();
    assert_eq!(titles, ["New", "Old"]);

    let all = ProjectRepo::list(&store, Visibility::All).await.unwrap();
    let titles: Vec<_> = all.iter().map(|p| p.fields.title.as_str()).collect();
    assert_eq!(titles, ["New", "Gone", "Old"]);
}

#[tokio::test]
async fn legacy_project_documents_are_migrated_on_read() {
    let store = MemoryDocumentStore::new();
    let id = uuid::Uuid::now_v7();
    let stored_at = Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap();
    store
        .insert_raw(
            COLLECTION_PROJECTS,
            StoredDocument {
                id,
                data: json!({
                    "title": "Legacy",
                    "description": "From the first version",
                    "image": "https://cdn.test/projects/legacy.png",
                    "tech": "Rust, Postgres",
                    "url": "https://legacy.test",
                }),
                created_at: stored_at,
                updated_at: stored_at,
            },
        )
        .await;

    let found = ProjectRepo::find_by_id(&store, id).await.unwrap().unwrap();
    assert_eq!(found.fields.image_url, "https://cdn.test/projects/legacy.png");
    assert_eq!(found.fields.technologies, ["Rust", "Postgres"]);
    assert_eq!(found.fields.links.app_link.as_deref(), Some("https://legacy.test"));
    assert_eq!(found.fields.created_at, stored_at);
}

#[tokio::test]
async fn non_object_documents_are_skipped_in_listings() {
    let store = MemoryDocumentStore::new();
    let now = Utc::now();
    store
        .insert_raw(
            COLLECTION_PROJECTS,
            StoredDocument {
                id: uuid::Uuid::now_v7(),
                data: json!("not a document"),
                created_at: now,
                updated_at: now,
            },
        )
        .await;
    ProjectRepo::create(&store, &project("Valid", ProjectStatus::Completed, 0))
        .await
        .unwrap();

    let all = ProjectRepo::list(&store, Visibility::All).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn update_and_delete_report_missing_records() {
    let store = MemoryDocumentStore::new();
    let missing = uuid::Uuid::now_v7();
    let fields = project("Ghost", ProjectStatus::Completed, 0);

    assert!(ProjectRepo::update(&store, missing, &fields).await.unwrap().is_none());
    assert!(!ProjectRepo::delete(&store, missing).await.unwrap());
    assert!(ProjectRepo::find_by_id(&store, missing).await.unwrap().is_none());
}

#[tokio::test]
async fn update_replaces_the_whole_record() {
    let store = MemoryDocumentStore::new();
    let created = ProjectRepo::create(&store, &project("Before", ProjectStatus::InProgress, 0))
        .await
        .unwrap();

    let mut changed = created.fields.clone();
    changed.title = "After".into();
    changed.tags = vec!["site".into()];
    let updated = ProjectRepo::update(&store, created.id, &changed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.fields.title, "After");

    let found = ProjectRepo::find_by_id(&store, created.id).await.unwrap().unwrap();
    assert_eq!(found.fields.tags, ["site"]);
    assert_eq!(store.count(COLLECTION_PROJECTS).await, 1);
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

#[tokio::test]
async fn public_audio_listing_only_shows_published() {
    let store = MemoryDocumentStore::new();
    AudioRepo::create(&store, &audio("draft", AudioStatus::Processing))
        .await
        .unwrap();
    AudioRepo::create(&store, &audio("live", AudioStatus::Published))
        .await
        .unwrap();

    let public = AudioRepo::list(&store, Visibility::Public).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].fields.title, "live");
    assert_eq!(store.count(COLLECTION_AUDIO).await, 2);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

struct BrokenStore;

#[async_trait::async_trait]
impl DocumentStore for BrokenStore {
    async fn list(&self, _: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn get(&self, _: &str, _: uuid::Uuid) -> Result<Option<StoredDocument>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn create(&self, _: &str, _: serde_json::Value) -> Result<uuid::Uuid, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn update(&self, _: &str, _: uuid::Uuid, _: serde_json::Value) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn delete(&self, _: &str, _: uuid::Uuid) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn get_singleton(&self, _: &str, _: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn put_singleton(&self, _: &str, _: &str, _: serde_json::Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn listing_failures_collapse_to_load_failed() {
    let err = ProjectRepo::list(&BrokenStore, Visibility::Public)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::LoadFailed { collection: "projects" });
    assert_eq!(err.to_string(), "Failed to load projects");

    let err = AudioRepo::list(&BrokenStore, Visibility::All).await.unwrap_err();
    assert_matches!(err, StoreError::LoadFailed { collection: "audio" });
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_setting_reads_as_disabled() {
    let store = MemoryDocumentStore::new();
    let setting = SettingsRepo::get(&store, SettingKey::Maintenance).await.unwrap();
    assert_eq!(setting, MaintenanceSetting::default());
}

#[tokio::test]
async fn settings_are_stored_per_key() {
    let store = MemoryDocumentStore::new();
    let on = MaintenanceSetting {
        enabled: true,
        updated_at: Some(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()),
        updated_by: Some("admin@agence.test".into()),
    };
    SettingsRepo::set(&store, SettingKey::AudioMaintenance, &on)
        .await
        .unwrap();

    assert_eq!(
        SettingsRepo::get(&store, SettingKey::AudioMaintenance).await.unwrap(),
        on
    );
    assert!(!SettingsRepo::get(&store, SettingKey::Maintenance).await.unwrap().enabled);
}
