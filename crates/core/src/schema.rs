//! Versioned document schema and read-time migration.
//!
//! Stored documents carry a `schemaVersion`. Version 1 (or no version)
//! documents predate the current field names; [`project_fields_from_document`]
//! and [`audio_fields_from_document`] migrate them once, on read, into the
//! typed records. Reads are lenient: a field with the wrong JSON type falls
//! back to its default instead of failing the whole listing.

use serde_json::{Map, Value};

use crate::audio::{is_valid_category, AudioFields, AudioFile, AudioStatus, DEFAULT_CATEGORY};
use crate::error::CoreError;
use crate::project::{Credential, Project, ProjectFields, ProjectLinks, ProjectStatus};
use crate::timestamp::{from_store_value, to_store_value};
use crate::types::{RecordId, Timestamp};

/// Schema version written by this codebase.
pub const SCHEMA_VERSION: u64 = 2;

/// Document key holding the schema version.
pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";

/// Version of a stored document; documents without the key are version 1.
pub fn document_version(doc: &Map<String, Value>) -> u64 {
    doc.get(SCHEMA_VERSION_KEY)
        .and_then(Value::as_u64)
        .unwrap_or(1)
}

// ---------------------------------------------------------------------------
// Legacy migrations
// ---------------------------------------------------------------------------

/// Move `from` onto `to` unless `to` already holds a non-empty value.
fn rename_key(doc: &mut Map<String, Value>, from: &str, to: &str) {
    let Some(value) = doc.remove(from) else {
        return;
    };
    let target_empty = match doc.get(to) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(_) => false,
    };
    if target_empty {
        doc.insert(to.to_string(), value);
    }
}

/// v1 projects: `image`, `tech`, `url`, `date`.
fn migrate_project_v1(doc: &mut Map<String, Value>) {
    rename_key(doc, "image", "imageUrl");
    rename_key(doc, "tech", "technologies");
    rename_key(doc, "date", "createdAt");

    if let Some(url) = doc.remove("url") {
        let links = doc
            .entry("links")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(links) = links {
            let has_app_link = links
                .get("app_link")
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty());
            if !has_app_link {
                links.insert("app_link".into(), url);
            }
        }
    }
}

/// v1 audio: `audioUrl`, `url`, `cover`, `image`, `date`.
fn migrate_audio_v1(doc: &mut Map<String, Value>) {
    rename_key(doc, "audioUrl", "fileUrl");
    rename_key(doc, "url", "fileUrl");
    rename_key(doc, "cover", "coverUrl");
    rename_key(doc, "image", "coverUrl");
    rename_key(doc, "date", "createdAt");
}

// ---------------------------------------------------------------------------
// Lenient field readers
// ---------------------------------------------------------------------------

fn string_field(doc: &Map<String, Value>, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn optional_string(doc: &Map<String, Value>, key: &str) -> Option<String> {
    doc.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A list of strings. Legacy documents sometimes hold a comma-separated
/// string instead of an array.
fn string_list(doc: &Map<String, Value>, key: &str) -> Vec<String> {
    match doc.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn created_at(doc: &Map<String, Value>, fallback: Timestamp) -> Timestamp {
    doc.get("createdAt")
        .and_then(from_store_value)
        .unwrap_or(fallback)
}

fn links_field(doc: &Map<String, Value>) -> ProjectLinks {
    let Some(links) = doc.get("links").and_then(Value::as_object) else {
        return ProjectLinks::default();
    };

    let credentials = links.get("credentials").and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_object)
            .map(|c| Credential {
                email: string_field(c, "email"),
                password: string_field(c, "password"),
            })
            .collect::<Vec<_>>()
    });

    let conversion_details = links
        .get("conversion_details")
        .is_some()
        .then(|| string_list(links, "conversion_details"));

    ProjectLinks {
        app_link: optional_string(links, "app_link"),
        repository: optional_string(links, "repository"),
        maquette: optional_string(links, "maquette"),
        credentials,
        conversion_details,
    }
}

fn as_object(doc: &Value) -> Result<Map<String, Value>, CoreError> {
    doc.as_object()
        .cloned()
        .ok_or_else(|| CoreError::Validation("Document must be a JSON object".into()))
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Read project fields from a stored (or imported) document.
///
/// `fallback_created_at` is used when the document has no readable
/// `createdAt`.
pub fn project_fields_from_document(
    doc: &Value,
    fallback_created_at: Timestamp,
) -> Result<ProjectFields, CoreError> {
    let mut doc = as_object(doc)?;
    if document_version(&doc) < SCHEMA_VERSION {
        migrate_project_v1(&mut doc);
    }

    Ok(ProjectFields {
        title: string_field(&doc, "title"),
        subtitle: optional_string(&doc, "subtitle"),
        job: optional_string(&doc, "job"),
        client: optional_string(&doc, "client"),
        description: string_field(&doc, "description"),
        image_url: string_field(&doc, "imageUrl"),
        images_url: string_list(&doc, "imagesUrl"),
        technologies: string_list(&doc, "technologies"),
        tags: string_list(&doc, "tags"),
        links: links_field(&doc),
        status: doc
            .get("status")
            .and_then(Value::as_str)
            .and_then(ProjectStatus::parse)
            .unwrap_or_default(),
        created_at: created_at(&doc, fallback_created_at),
    })
}

/// Build a typed [`Project`] from a stored document.
pub fn project_from_document(
    id: RecordId,
    doc: &Value,
    stored_at: Timestamp,
) -> Result<Project, CoreError> {
    Ok(Project {
        id,
        fields: project_fields_from_document(doc, stored_at)?,
    })
}

/// Serialize project fields into the current document schema.
pub fn project_to_document(fields: &ProjectFields) -> Value {
    to_document(fields, &fields.created_at)
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

/// Read audio fields from a stored (or imported) document.
pub fn audio_fields_from_document(
    doc: &Value,
    fallback_created_at: Timestamp,
) -> Result<AudioFields, CoreError> {
    let mut doc = as_object(doc)?;
    if document_version(&doc) < SCHEMA_VERSION {
        migrate_audio_v1(&mut doc);
    }

    let category = optional_string(&doc, "category")
        .filter(|c| is_valid_category(c))
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let duration = doc
        .get("duration")
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0).round() as u64)))
        .and_then(|d| u32::try_from(d).ok())
        .unwrap_or(0);

    Ok(AudioFields {
        title: string_field(&doc, "title"),
        description: string_field(&doc, "description"),
        artist: string_field(&doc, "artist"),
        category,
        file_url: string_field(&doc, "fileUrl"),
        cover_url: optional_string(&doc, "coverUrl"),
        duration,
        status: doc
            .get("status")
            .and_then(Value::as_str)
            .and_then(AudioStatus::parse)
            .unwrap_or_default(),
        created_at: created_at(&doc, fallback_created_at),
    })
}

/// Build a typed [`AudioFile`] from a stored document.
pub fn audio_from_document(
    id: RecordId,
    doc: &Value,
    stored_at: Timestamp,
) -> Result<AudioFile, CoreError> {
    Ok(AudioFile {
        id,
        fields: audio_fields_from_document(doc, stored_at)?,
    })
}

/// Serialize audio fields into the current document schema.
pub fn audio_to_document(fields: &AudioFields) -> Value {
    to_document(fields, &fields.created_at)
}

/// Serialize `fields`, stamp the schema version and store `createdAt` in
/// the store-native timestamp shape.
fn to_document<T: serde::Serialize>(fields: &T, created_at: &Timestamp) -> Value {
    let mut doc = match serde_json::to_value(fields) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    doc.insert("createdAt".into(), to_store_value(created_at));
    doc.insert(SCHEMA_VERSION_KEY.into(), Value::from(SCHEMA_VERSION));
    Value::Object(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::is_store_timestamp;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn epoch() -> Timestamp {
        Utc.timestamp_opt(0, 0).unwrap()
    }

    #[test]
    fn legacy_project_fields_are_coalesced() {
        let doc = json!({
            "title": "Vitrine",
            "description": "Site vitrine",
            "image": "https://cdn.example/old.png",
            "tech": ["Rust", "Svelte"],
            "url": "https://vitrine.example",
            "date": "2022-01-05T10:00:00Z"
        });

        let fields = project_fields_from_document(&doc, epoch()).unwrap();

        assert_eq!(fields.image_url, "https://cdn.example/old.png");
        assert_eq!(fields.technologies, vec!["Rust", "Svelte"]);
        assert_eq!(fields.links.app_link.as_deref(), Some("https://vitrine.example"));
        assert_eq!(fields.created_at.to_rfc3339(), "2022-01-05T10:00:00+00:00");
    }

    #[test]
    fn canonical_fields_win_over_legacy_ones() {
        let doc = json!({
            "title": "Vitrine",
            "imageUrl": "https://cdn.example/new.png",
            "image": "https://cdn.example/old.png",
            "links": { "app_link": "https://new.example" },
            "url": "https://old.example"
        });

        let fields = project_fields_from_document(&doc, epoch()).unwrap();

        assert_eq!(fields.image_url, "https://cdn.example/new.png");
        assert_eq!(fields.links.app_link.as_deref(), Some("https://new.example"));
    }

    #[test]
    fn current_version_documents_are_not_migrated() {
        let doc = json!({ "schemaVersion": 2, "title": "T", "tech": ["ignored"] });
        let fields = project_fields_from_document(&doc, epoch()).unwrap();
        assert!(fields.technologies.is_empty());
    }

    #[test]
    fn comma_separated_technologies_are_split() {
        let doc = json!({ "tech": "React, Node ,  , Postgres" });
        let fields = project_fields_from_document(&doc, epoch()).unwrap();
        assert_eq!(fields.technologies, vec!["React", "Node", "Postgres"]);
    }

    #[test]
    fn wrong_types_fall_back_to_defaults() {
        let doc = json!({
            "schemaVersion": 2,
            "title": 42,
            "tags": "not-a-list-but-a-string",
            "status": "Unknown",
            "links": "nope"
        });
        let fields = project_fields_from_document(&doc, epoch()).unwrap();
        assert!(fields.title.is_empty());
        assert_eq!(fields.tags, vec!["not-a-list-but-a-string"]);
        assert_eq!(fields.status, ProjectStatus::InProgress);
        assert_eq!(fields.links, ProjectLinks::default());
        assert_eq!(fields.created_at, epoch());
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(project_fields_from_document(&json!([1, 2]), epoch()).is_err());
        assert!(audio_fields_from_document(&json!("x"), epoch()).is_err());
    }

    #[test]
    fn project_document_round_trips() {
        let fields = ProjectFields {
            title: "Atelier".into(),
            description: "Boutique".into(),
            technologies: vec!["Rust".into()],
            created_at: Utc.timestamp_opt(1_700_000_000, 5_000).unwrap(),
            ..Default::default()
        };

        let doc = project_to_document(&fields);
        assert_eq!(doc[SCHEMA_VERSION_KEY], 2);
        assert!(is_store_timestamp(&doc["createdAt"]));

        let back = project_fields_from_document(&doc, epoch()).unwrap();
        assert_eq!(back, fields);
    }

    #[test]
    fn legacy_audio_fields_are_coalesced() {
        let doc = json!({
            "title": "Jingle",
            "audioUrl": "https://cdn.example/a.mp3",
            "cover": "https://cdn.example/c.png",
            "category": "Inconnue",
            "duration": 12.6
        });

        let fields = audio_fields_from_document(&doc, epoch()).unwrap();

        assert_eq!(fields.file_url, "https://cdn.example/a.mp3");
        assert_eq!(fields.cover_url.as_deref(), Some("https://cdn.example/c.png"));
        assert_eq!(fields.category, DEFAULT_CATEGORY);
        assert_eq!(fields.duration, 13);
    }

    #[test]
    fn audio_document_round_trips() {
        let fields = AudioFields {
            title: "Podcast #1".into(),
            category: "Podcast".into(),
            file_url: "https://cdn.example/p.mp3".into(),
            duration: 1800,
            status: AudioStatus::Published,
            created_at: Utc.timestamp_opt(1_650_000_000, 0).unwrap(),
            ..Default::default()
        };

        let back = audio_fields_from_document(&audio_to_document(&fields), epoch()).unwrap();
        assert_eq!(back, fields);
    }
}
