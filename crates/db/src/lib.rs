//! Persistence layer for Vitrine content.
//!
//! Records live in a document store behind the [`DocumentStore`] trait.
//! [`PgDocumentStore`] keeps documents as JSONB rows; [`MemoryDocumentStore`]
//! is used for local development and tests. The typed repositories in
//! [`repositories`] sit on top and hand out strongly-typed records.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{DocumentStore, StoreError, StoredDocument};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
