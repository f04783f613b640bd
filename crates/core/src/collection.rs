//! Named collections in the document store.

use crate::error::CoreError;

/// Collection holding [`crate::project::Project`] documents.
pub const COLLECTION_PROJECTS: &str = "projects";

/// Collection holding [`crate::audio::AudioFile`] documents.
pub const COLLECTION_AUDIO: &str = "audio";

/// Collection holding the singleton settings documents.
pub const COLLECTION_SETTINGS: &str = "settings";

/// Pseudo-collection name accepted by the exporter to dump everything.
pub const EXPORT_ALL: &str = "all";

/// A content collection managed through the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    Audio,
}

impl Collection {
    /// Every content collection, in export order.
    pub const ALL: [Collection; 2] = [Collection::Projects, Collection::Audio];

    /// Store-side collection name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => COLLECTION_PROJECTS,
            Self::Audio => COLLECTION_AUDIO,
        }
    }

    /// Parse a collection name from a path segment.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            COLLECTION_PROJECTS => Ok(Self::Projects),
            COLLECTION_AUDIO => Ok(Self::Audio),
            other => Err(CoreError::Validation(format!(
                "Unknown collection '{other}'. Must be one of: {COLLECTION_PROJECTS}, {COLLECTION_AUDIO}"
            ))),
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_collections() {
        assert_eq!(Collection::parse("projects").unwrap(), Collection::Projects);
        assert_eq!(Collection::parse("audio").unwrap(), Collection::Audio);
    }

    #[test]
    fn parse_rejects_unknown_and_settings() {
        assert!(Collection::parse("settings").is_err());
        assert!(Collection::parse("all").is_err());
        assert!(Collection::parse("").is_err());
    }
}
