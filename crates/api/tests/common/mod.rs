//! Shared harness for the API integration tests.
//!
//! Builds the production router over in-memory doubles for every outside
//! dependency: documents, objects, mail and the chat backend.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vitrine_api::auth::jwt::{generate_access_token, JwtConfig};
use vitrine_api::config::ServerConfig;
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_assistant::{ChatBackend, ChatError};
use vitrine_core::roles::ROLE_ADMIN;
use vitrine_core::types::RecordId;
use vitrine_db::{DocumentStore, MemoryDocumentStore, StoreError, StoredDocument};
use vitrine_notify::{EmailError, LeadMailer, Mailer, OutgoingEmail};
use vitrine_storage::{AssetUploader, MemoryObjectStore, ObjectStore, StorageError};

pub const JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const ASSET_BASE: &str = "https://cdn.vitrine.test";
pub const LOCAL_ASSET_BASE: &str = "http://127.0.0.1:8080/assets";
pub const NOTIFY_ADDRESS: &str = "studio@vitrine.test";
pub const BOUNDARY: &str = "vitrine-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

// ---------------------------------------------------------------------------
// Doubles
// ---------------------------------------------------------------------------

/// Records every email instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Answers every message with a fixed prefix, or fails when `fail` is set.
pub struct EchoChat {
    pub fail: bool,
}

#[async_trait]
impl ChatBackend for EchoChat {
    async fn reply(&self, message: &str) -> Result<String, ChatError> {
        if self.fail {
            return Err(ChatError::ApiError {
                status: 503,
                body: "overloaded".into(),
            });
        }
        Ok(format!("echo: {message}"))
    }
}

/// Wraps the memory store, counting writes and optionally failing them.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryDocumentStore,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    /// Fail the create whose 1-based sequence number is listed.
    pub fail_creates: Vec<usize>,
    pub fail_reads: bool,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.creates.load(Ordering::SeqCst) + self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("connection reset".into()));
        }
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: RecordId) -> Result<Option<StoredDocument>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn create(&self, collection: &str, data: Value) -> Result<RecordId, StoreError> {
        let n = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_creates.contains(&n) {
            return Err(StoreError::Unavailable("write rejected".into()));
        }
        self.inner.create(collection, data).await
    }

    async fn update(&self, collection: &str, id: RecordId, data: Value) -> Result<bool, StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(collection, id, data).await
    }

    async fn delete(&self, collection: &str, id: RecordId) -> Result<bool, StoreError> {
        self.inner.delete(collection, id).await
    }

    async fn get_singleton(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get_singleton(collection, key).await
    }

    async fn put_singleton(&self, collection: &str, key: &str, data: Value) -> Result<(), StoreError> {
        self.inner.put_singleton(collection, key, data).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("connection reset".into()));
        }
        Ok(())
    }
}

/// Object store whose writes succeed and whose deletes always fail.
#[derive(Default)]
pub struct UndeletableObjects {
    pub inner: MemoryObjectStore,
    pub delete_attempts: AtomicUsize,
}

#[async_trait]
impl ObjectStore for UndeletableObjects {
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.inner.put(key, content_type, bytes).await
    }

    async fn delete(&self, _key: &str) -> Result<(), StorageError> {
        self.delete_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Backend("access denied".into()))
    }
}

/// Object store that is down.
pub struct OfflineObjects;

#[async_trait]
impl ObjectStore for OfflineObjects {
    async fn put(&self, _key: &str, _content_type: &str, _bytes: Vec<u8>) -> Result<(), StorageError> {
        Err(StorageError::Backend("bucket unreachable".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("bucket unreachable".into()))
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The router plus handles on the doubles behind it.
pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router over the given store and object store.
pub fn build_test_app_with(
    store: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
    chat: Arc<dyn ChatBackend>,
) -> TestApp {
    build_app(store, AssetUploader::new(objects, ASSET_BASE), None, chat)
}

/// Build the app the way `main.rs` does without a bucket: assets stay in
/// memory and are served under `/assets`.
pub fn build_local_assets_app(store: Arc<dyn DocumentStore>) -> (TestApp, Arc<MemoryObjectStore>) {
    let objects = Arc::new(MemoryObjectStore::new());
    let uploader = AssetUploader::new(objects.clone(), LOCAL_ASSET_BASE);
    let app = build_app(
        store,
        uploader,
        Some(objects.clone()),
        Arc::new(EchoChat { fail: false }),
    );
    (app, objects)
}

fn build_app(
    store: Arc<dyn DocumentStore>,
    uploader: AssetUploader,
    local_assets: Option<Arc<MemoryObjectStore>>,
    chat: Arc<dyn ChatBackend>,
) -> TestApp {
    let config = test_config();
    let mailer = Arc::new(RecordingMailer::default());
    let leads = LeadMailer::new(
        Some(Arc::clone(&mailer) as Arc<dyn Mailer>),
        NOTIFY_ADDRESS,
    );

    let state = AppState {
        store,
        uploader: Arc::new(uploader),
        local_assets,
        leads: Arc::new(leads),
        chat,
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        mailer,
    }
}

/// Build the app over fresh in-memory doubles.
pub fn build_test_app(store: Arc<dyn DocumentStore>) -> TestApp {
    build_test_app_with(
        store,
        Arc::new(MemoryObjectStore::new()),
        Arc::new(EchoChat { fail: false }),
    )
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn admin_token() -> String {
    generate_access_token(
        "admin-1",
        Some("admin@vitrine.test"),
        ROLE_ADMIN,
        &test_config().jwt,
    )
    .unwrap()
}

pub fn viewer_token() -> String {
    generate_access_token("viewer-1", None, "viewer", &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, builder(Method::GET, uri, token).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, builder(Method::DELETE, uri, token).body(Body::empty()).unwrap()).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, token, body).await
}

pub async fn post_raw(app: Router, uri: &str, token: Option<&str>, body: &str) -> Response<Body> {
    let request = builder(Method::POST, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, String),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    },
}

/// The `record` part of a record form.
pub fn record_part(record: Value) -> Part<'static> {
    Part::Text("record", record.to_string())
}

pub fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    parts: Vec<Part<'_>>,
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Let spawned cleanup tasks run.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
}

/// A minimal valid project draft.
pub fn project_draft(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "description": "Site vitrine pour un cabinet d'architectes",
        "technologies": ["Rust", "Svelte"],
    })
}

pub fn png(name: &str) -> Part<'_> {
    Part::File {
        name: "image",
        file_name: name,
        content_type: "image/png",
        bytes: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
    }
}
