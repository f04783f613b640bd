//! Vitrine domain core.
//!
//! Pure domain logic with no I/O: the two content record types and their
//! validation, the read-time schema migration, the asset upload policy,
//! the editor and bulk-import state machines, and the export envelope.

pub mod assets;
pub mod audio;
pub mod collection;
pub mod contact;
pub mod editor;
pub mod error;
pub mod export;
pub mod import;
pub mod project;
pub mod roles;
pub mod schema;
pub mod settings;
pub mod timestamp;
pub mod types;
