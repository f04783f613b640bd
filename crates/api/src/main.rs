use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_api::config::{ServerConfig, StoreBackend};
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_assistant::{ChatBackend, ChatConfig, OpenAiChat, UnconfiguredChat};
use vitrine_db::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use vitrine_notify::{EmailConfig, LeadMailer, Mailer, SmtpMailer};
use vitrine_storage::{AssetUploader, MemoryObjectStore, ObjectStore, S3ObjectStore, StorageConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Document store ---
    let store: Arc<dyn DocumentStore> = match StoreBackend::from_env() {
        StoreBackend::Postgres { database_url } => {
            let pool = vitrine_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            vitrine_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            vitrine_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgDocumentStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; content is lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    // --- Asset storage ---
    let (uploader, local_assets) = match StorageConfig::from_env() {
        Some(storage) => {
            let objects: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::from_config(&storage).await);
            tracing::info!(bucket = %storage.bucket, region = %storage.region, "S3 asset storage configured");
            (AssetUploader::new(objects, storage.public_base_url), None)
        }
        None => {
            tracing::warn!("S3_BUCKET not set; assets are kept in memory and served under /assets");
            let objects = Arc::new(MemoryObjectStore::new());
            let uploader = AssetUploader::new(
                objects.clone(),
                format!("http://{}:{}/assets", config.host, config.port),
            );
            (uploader, Some(objects))
        }
    };

    // --- Mail ---
    let leads = match EmailConfig::from_env() {
        Some(email) => {
            let mailer: Arc<dyn Mailer> =
                Arc::new(SmtpMailer::new(&email).expect("Invalid SMTP configuration"));
            tracing::info!(host = %email.smtp_host, "SMTP mailer configured");
            LeadMailer::new(Some(mailer), email.notify_address())
        }
        None => {
            tracing::warn!("SMTP_HOST not set; lead emails are disabled");
            LeadMailer::new(None, String::new())
        }
    };

    // --- Assistant ---
    let chat: Arc<dyn ChatBackend> = match ChatConfig::from_env() {
        Some(chat) => {
            tracing::info!(model = %chat.model, "Chat assistant configured");
            Arc::new(OpenAiChat::new(chat))
        }
        None => {
            tracing::warn!("LLM_API_KEY not set; chat assistant is disabled");
            Arc::new(UnconfiguredChat)
        }
    };

    // --- App state ---
    let state = AppState {
        store,
        uploader: Arc::new(uploader),
        local_assets,
        leads: Arc::new(leads),
        chat,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
