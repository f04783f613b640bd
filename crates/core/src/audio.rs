//! Audio showcase records.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

/// Category assigned when none (or an unknown one) is given.
pub const DEFAULT_CATEGORY: &str = "Autre";

/// Fixed set of audio categories offered by the admin form.
pub const AUDIO_CATEGORIES: &[&str] = &[
    "Musique",
    "Podcast",
    "Voix-off",
    "Jingle",
    "Effet sonore",
    DEFAULT_CATEGORY,
];

/// Whether `category` is one of [`AUDIO_CATEGORIES`].
pub fn is_valid_category(category: &str) -> bool {
    AUDIO_CATEGORIES.contains(&category)
}

/// Audio publication status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioStatus {
    #[default]
    Processing,
    Published,
    Archived,
}

impl AudioStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Processing" => Some(Self::Processing),
            "Published" => Some(Self::Published),
            "Archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Every audio field except the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioFields {
    pub title: String,
    pub description: String,
    pub artist: String,
    pub category: String,
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    /// Length in whole seconds, measured by the client when the file is picked.
    pub duration: u32,
    pub status: AudioStatus,
    pub created_at: Timestamp,
}

impl Default for AudioFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            artist: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            file_url: String::new(),
            cover_url: None,
            duration: 0,
            status: AudioStatus::default(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl AudioFields {
    /// Check the fields required at save time.
    ///
    /// `pending_file` is true when an audio upload accompanies the save, in
    /// which case `file_url` is filled in after the upload.
    pub fn validate(&self, pending_file: bool) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("Title is required".into()));
        }
        if self.file_url.trim().is_empty() && !pending_file {
            return Err(CoreError::Validation("An audio file is required".into()));
        }
        if !is_valid_category(&self.category) {
            return Err(CoreError::Validation(format!(
                "Invalid category '{}'. Must be one of: {}",
                self.category,
                AUDIO_CATEGORIES.join(", ")
            )));
        }
        Ok(())
    }

    /// Keep the stored file when an edit does not supply one.
    pub fn inherit_file(&mut self, existing: &AudioFields) {
        if self.file_url.trim().is_empty() {
            self.file_url = existing.file_url.clone();
        }
    }

    /// Every asset URL this record references in object storage.
    pub fn asset_urls(&self) -> Vec<&str> {
        std::iter::once(self.file_url.as_str())
            .chain(self.cover_url.as_deref())
            .filter(|u| !u.is_empty())
            .collect()
    }
}

/// A persisted audio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFile {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: AudioFields,
}

impl AudioFile {
    /// Only published audio is visible on the public site.
    pub fn is_public(&self) -> bool {
        self.fields.status == AudioStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn with_file() -> AudioFields {
        AudioFields {
            title: "Spot radio".into(),
            file_url: "https://cdn.example/audio/spot.mp3".into(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_use_fallback_category() {
        let fields = AudioFields::default();
        assert_eq!(fields.category, "Autre");
        assert_eq!(fields.duration, 0);
        assert_eq!(fields.status, AudioStatus::Processing);
    }

    #[test]
    fn new_record_requires_file_or_pending_upload() {
        let mut fields = with_file();
        fields.file_url.clear();
        assert_matches!(fields.validate(false), Err(CoreError::Validation(_)));
        assert!(fields.validate(true).is_ok());
    }

    #[test]
    fn title_is_required() {
        let mut fields = with_file();
        fields.title.clear();
        assert_matches!(fields.validate(true), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut fields = with_file();
        fields.category = "Techno".into();
        assert_matches!(fields.validate(false), Err(CoreError::Validation(msg)) if msg.contains("Techno"));
    }

    #[test]
    fn edit_inherits_existing_file() {
        let existing = with_file();
        let mut edit = AudioFields {
            title: "Spot radio v2".into(),
            ..Default::default()
        };
        edit.inherit_file(&existing);
        assert_eq!(edit.file_url, existing.file_url);
        assert!(edit.validate(false).is_ok());
    }

    #[test]
    fn only_published_audio_is_public() {
        let mut audio = AudioFile {
            id: uuid::Uuid::now_v7(),
            fields: with_file(),
        };
        assert!(!audio.is_public());
        audio.fields.status = AudioStatus::Published;
        assert!(audio.is_public());
    }
}
