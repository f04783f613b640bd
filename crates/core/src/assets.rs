//! Asset upload policy: size ceilings, MIME checks, and storage keys.
//!
//! Everything here runs before any call to object storage so that a bad
//! upload fails fast with a specific message.

use crate::error::CoreError;

const MB: u64 = 1024 * 1024;

/// Folder for project images.
pub const FOLDER_PROJECTS: &str = "projects";

/// Folder for audio files.
pub const FOLDER_AUDIO: &str = "audio";

/// Folder for audio cover art.
pub const FOLDER_COVERS: &str = "audio/covers";

/// The kind of asset being uploaded, which is also the editor slot it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Main project image.
    Image,
    /// Audio file of an audio record.
    Audio,
    /// Cover art of an audio record.
    Cover,
}

impl AssetKind {
    /// Maximum accepted size in bytes.
    pub fn max_bytes(self) -> u64 {
        match self {
            Self::Image => 10 * MB,
            Self::Audio => 50 * MB,
            Self::Cover => 5 * MB,
        }
    }

    /// Required MIME type prefix.
    pub fn mime_prefix(self) -> &'static str {
        match self {
            Self::Image | Self::Cover => "image/",
            Self::Audio => "audio/",
        }
    }

    /// Storage folder the asset is written under.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Image => FOLDER_PROJECTS,
            Self::Audio => FOLDER_AUDIO,
            Self::Cover => FOLDER_COVERS,
        }
    }

    /// Whether a failed upload in this slot aborts the save.
    ///
    /// The primary asset of a new record is critical; cover art never is,
    /// and a replacement upload on an existing record keeps the old asset.
    pub fn is_critical(self, is_new_record: bool) -> bool {
        match self {
            Self::Image | Self::Audio => is_new_record,
            Self::Cover => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio file",
            Self::Cover => "cover image",
        }
    }
}

/// Validate an upload against the size ceiling and MIME prefix for `kind`.
pub fn validate_upload(kind: AssetKind, size_bytes: u64, content_type: &str) -> Result<(), CoreError> {
    if size_bytes == 0 {
        return Err(CoreError::Validation(format!("The {} is empty", kind.label())));
    }
    if size_bytes > kind.max_bytes() {
        return Err(CoreError::Validation(format!(
            "The {} is too large ({:.1} MB). Maximum size is {} MB",
            kind.label(),
            size_bytes as f64 / MB as f64,
            kind.max_bytes() / MB
        )));
    }
    if !content_type.to_ascii_lowercase().starts_with(kind.mime_prefix()) {
        return Err(CoreError::Validation(format!(
            "Invalid file type '{content_type}' for {}. Expected {}*",
            kind.label(),
            kind.mime_prefix()
        )));
    }
    Ok(())
}

/// Reduce a file name to URL-safe characters and drop any path part.
///
/// ASCII letters, digits, `.`, `-` and `_` are kept. Every run of other
/// characters becomes a single `_`, so the key can be embedded in a public
/// URL verbatim and recovered from it by [`key_from_url`].
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut out = String::with_capacity(base.len());
    let mut replaced = false;
    for c in base.trim().chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            out.push(c);
            replaced = false;
        } else {
            if !replaced {
                out.push('_');
            }
            replaced = true;
        }
    }
    if out.trim_matches(['_', '.']).is_empty() {
        "file".to_string()
    } else {
        out
    }
}

/// Build a collision-resistant storage key: `{folder}/{millis}_{name}`.
pub fn storage_key(folder: &str, file_name: &str, unix_millis: i64) -> String {
    let folder = folder.trim_matches('/');
    format!("{folder}/{unix_millis}_{}", sanitize_file_name(file_name))
}

/// Recover the storage key from a public URL under `public_base`.
///
/// Returns `None` when the URL does not point into our bucket (external
/// links are not ours to delete) or names no object.
pub fn key_from_url(url: &str, public_base: &str) -> Option<String> {
    let base = public_base.trim_end_matches('/');
    let rest = url.strip_prefix(base)?.strip_prefix('/')?;
    let key = rest.split(['?', '#']).next().unwrap_or(rest);
    (!key.is_empty()).then(|| key.to_string())
}
