//! Binary asset storage for Vitrine records.
//!
//! Assets live in an object store behind the [`ObjectStore`] trait:
//! [`S3ObjectStore`] in deployments, [`MemoryObjectStore`] for local
//! development and tests. [`AssetUploader`] applies the upload policy from
//! `vitrine_core::assets` and turns keys into public URLs.

pub mod config;
pub mod memory;
pub mod object_store;
pub mod s3;
pub mod uploader;

pub use config::StorageConfig;
pub use memory::MemoryObjectStore;
pub use object_store::{ObjectStore, StorageError};
pub use s3::S3ObjectStore;
pub use uploader::AssetUploader;
