//! Repository layer (the record store adapter).
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&dyn DocumentStore` as the first argument and return
//! strongly-typed records. Listings apply the read-time schema migration
//! and come back newest first.

pub mod audio_repo;
pub mod project_repo;
pub mod settings_repo;

pub use audio_repo::AudioRepo;
pub use project_repo::ProjectRepo;
pub use settings_repo::SettingsRepo;

/// Which records a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only what the public site shows.
    Public,
    /// Everything, for the admin area.
    All,
}

/// Log the underlying cause and collapse it into the generic load failure.
fn load_failed(collection: &'static str, err: crate::StoreError) -> crate::StoreError {
    tracing::error!(collection, error = %err, "Failed to load collection");
    crate::StoreError::LoadFailed { collection }
}
