//! Object storage configuration.

/// Default AWS region when `S3_REGION` is not set.
const DEFAULT_REGION: &str = "eu-west-3";

/// S3 settings. Absent when no bucket is configured.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Base every public asset URL starts with.
    pub public_base_url: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint: Option<String>,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `S3_BUCKET` is not set, in which case assets are
    /// kept in memory.
    ///
    /// | Variable             | Required | Default                                   |
    /// |----------------------|----------|-------------------------------------------|
    /// | `S3_BUCKET`          | yes      | none                                      |
    /// | `S3_REGION`          | no       | `eu-west-3`                               |
    /// | `S3_PUBLIC_BASE_URL` | no       | `https://{bucket}.s3.{region}.amazonaws.com` |
    /// | `S3_ENDPOINT`        | no       | none                                      |
    pub fn from_env() -> Option<Self> {
        let bucket = std::env::var("S3_BUCKET").ok().filter(|b| !b.is_empty())?;
        let region = std::env::var("S3_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let public_base_url = std::env::var("S3_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.{region}.amazonaws.com"));
        Some(Self {
            bucket,
            region,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            endpoint: std::env::var("S3_ENDPOINT").ok().filter(|e| !e.is_empty()),
        })
    }
}
