//! Content services shared by the admin handlers.
//!
//! - [`content`] -- the [`content::ContentRecord`] seam over the two record kinds.
//! - [`form`] -- multipart record forms (JSON draft plus file parts).
//! - [`records`] -- one editor save (validation, uploads, persistence) and deletes.
//! - [`cleanup`] -- best-effort asset deletion on spawned tasks.
//! - [`import`] -- sequential bulk import runs.
//! - [`export`] -- collection dumps.

pub mod cleanup;
pub mod content;
pub mod export;
pub mod form;
pub mod import;
pub mod records;
