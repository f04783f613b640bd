//! HTTP-level tests for bulk import and collection export.

mod common;

use std::sync::Arc;

use axum::http::header::CONTENT_DISPOSITION;
use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use common::{
    admin_token, body_bytes, body_json, build_test_app, get, post_raw, send_multipart,
    CountingStore, Part,
};
use serde_json::{json, Value};
use vitrine_core::timestamp::to_store_value;
use vitrine_db::{MemoryDocumentStore, StoredDocument};

async fn import(app: axum::Router, collection: &str, input: &str) -> (StatusCode, Value) {
    let token = admin_token();
    let response = post_raw(
        app,
        &format!("/api/v1/admin/import/{collection}"),
        Some(&token),
        input,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[tokio::test]
async fn preview_fills_defaults_without_writing() {
    let store = Arc::new(CountingStore::default());
    let app = build_test_app(store.clone());
    let token = admin_token();

    let response = post_raw(
        app.router(),
        "/api/v1/admin/import/projects/preview",
        Some(&token),
        r#"[{}, {"title": "Boutique en ligne"}]"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["title"], "Projet 1");
    assert_eq!(records[0]["technologies"], json!([]));
    assert_eq!(records[0]["status"], "In Progress");
    assert_eq!(records[1]["title"], "Boutique en ligne");
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn imported_items_get_default_values() {
    let app = build_test_app(Arc::new(MemoryDocumentStore::new()));

    let (status, json) = import(app.router(), "projects", r#"[{"description": "x"}, {}]"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["success_count"], 2);
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["errors"], json!([]));

    let token = admin_token();
    let listed = body_json(get(app.router(), "/api/v1/admin/projects", Some(&token)).await).await;
    let mut titles: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            assert_eq!(p["technologies"], json!([]));
            assert_eq!(p["status"], "In Progress");
            p["title"].as_str().unwrap()
        })
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, ["Projet 1", "Projet 2"]);
}

#[tokio::test]
async fn failing_item_does_not_stop_the_batch() {
    let store = Arc::new(CountingStore {
        fail_creates: vec![2],
        ..Default::default()
    });
    let app = build_test_app(store.clone());

    let (status, json) = import(
        app.router(),
        "projects",
        r#"[{"title": "Alpha"}, {"title": "Bravo"}, {"title": "Charlie"}]"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["success_count"], 2);
    assert_eq!(json["data"]["total"], 3);
    let errors = json["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().starts_with("Bravo: "));

    let token = admin_token();
    let listed = body_json(get(app.router(), "/api/v1/admin/projects", Some(&token)).await).await;
    let mut titles: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, ["Alpha", "Charlie"]);
}

#[tokio::test]
async fn audio_items_without_file_are_reported() {
    let app = build_test_app(Arc::new(MemoryDocumentStore::new()));

    let (status, json) = import(
        app.router(),
        "audio",
        r#"[{"title": "Jingle", "fileUrl": "https://media.example.org/j.mp3"}, {"artist": "Studio"}]"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["success_count"], 1);
    assert_eq!(
        json["data"]["errors"],
        json!(["Audio 2: An audio file is required"])
    );
}

#[tokio::test]
async fn unknown_status_is_reported_per_item() {
    let app = build_test_app(Arc::new(MemoryDocumentStore::new()));

    let (status, json) = import(
        app.router(),
        "projects",
        r#"[{"title": "Alpha", "status": "Draft"}, {"title": "Bravo", "status": "Archived"}]"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["success_count"], 1);
    assert_eq!(
        json["data"]["errors"],
        json!([r#"Alpha: Unknown status "Draft". Must be one of: In Progress, Completed, Archived"#])
    );

    let listed = body_json(get(app.router(), "/api/v1/admin/projects", Some(&admin_token())).await).await;
    let titles: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Bravo"]);
}

#[tokio::test]
async fn import_accepts_an_uploaded_file() {
    let app = build_test_app(Arc::new(MemoryDocumentStore::new()));

    let response = send_multipart(
        app.router(),
        axum::http::Method::POST,
        "/api/v1/admin/import/projects",
        Some(&admin_token()),
        vec![Part::File {
            name: "file",
            file_name: "projets.json",
            content_type: "application/json",
            bytes: br#"[{"title": "Depuis un fichier"}]"#.to_vec(),
        }],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["success_count"], 1);
}

#[tokio::test]
async fn malformed_input_is_rejected() {
    let app = build_test_app(Arc::new(MemoryDocumentStore::new()));

    for input in ["{not json", r#"{"title": "pas un tableau"}"#, "[1, 2]"] {
        let (status, json) = import(app.router(), "projects", input).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "input: {input}");
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn unknown_collection_is_rejected() {
    let app = build_test_app(Arc::new(MemoryDocumentStore::new()));
    let (status, _) = import(app.router(), "videos", "[]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn template_is_served_as_attachment() {
    let app = build_test_app(Arc::new(MemoryDocumentStore::new()));
    let token = admin_token();
    let response = get(
        app.router(),
        "/api/v1/admin/import/audio/template",
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert_eq!(disposition, "attachment; filename=\"template-audio.json\"");
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(json.as_array().is_some_and(|items| !items.is_empty()));
    assert!(json[0]["coverUrl"].is_string());
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

fn seeded_document(created: DateTime<Utc>, reviewed: DateTime<Utc>) -> StoredDocument {
    StoredDocument {
        id: uuid::Uuid::now_v7(),
        data: json!({
            "title": "Cabinet Durand",
            "description": "Site vitrine",
            "createdAt": to_store_value(&created),
            "links": { "review": { "at": to_store_value(&reviewed) } },
            "schemaVersion": 2,
        }),
        created_at: created,
        updated_at: created,
    }
}

#[tokio::test]
async fn export_rewrites_store_timestamps_as_iso_strings() {
    let store = Arc::new(MemoryDocumentStore::new());
    let created = Utc.timestamp_opt(1_700_000_000, 250_000_000).unwrap();
    let reviewed = Utc.with_ymd_and_hms(2024, 3, 9, 17, 30, 0).unwrap();
    store
        .insert_raw("projects", seeded_document(created, reviewed))
        .await;
    let app = build_test_app(store);
    let token = admin_token();

    let response = get(app.router(), "/api/v1/admin/export/projects", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"export-projects-"));
    assert!(disposition.ends_with(".json\""));

    let bytes = body_bytes(response).await;
    assert!(std::str::from_utf8(&bytes).unwrap().contains("\n  "));
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["collection"], "projects");
    assert_eq!(json["exportedBy"], "admin@vitrine.test");

    let record = &json["data"][0];
    let exported_created = record["createdAt"].as_str().unwrap();
    assert_eq!(
        DateTime::parse_from_rfc3339(exported_created).unwrap(),
        created
    );
    let exported_reviewed = record["links"]["review"]["at"].as_str().unwrap();
    assert_eq!(
        DateTime::parse_from_rfc3339(exported_reviewed).unwrap(),
        reviewed
    );
}

#[tokio::test]
async fn export_all_nests_each_collection() {
    let app = build_test_app(Arc::new(MemoryDocumentStore::new()));
    import(app.router(), "projects", r#"[{"title": "Un"}]"#).await;
    let token = admin_token();

    let response = get(app.router(), "/api/v1/admin/export/all", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["projects"][0]["title"], "Un");
    assert_eq!(json["audio"], json!([]));
    assert!(json["exportedAt"].is_string());
}

#[tokio::test]
async fn export_read_failure_returns_a_single_error() {
    let store = Arc::new(CountingStore {
        fail_reads: true,
        ..Default::default()
    });
    let app = build_test_app(store);
    let token = admin_token();

    let response = get(app.router(), "/api/v1/admin/export/all", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "LOAD_FAILED");
    assert_eq!(json["error"], "Failed to load projects");
}
