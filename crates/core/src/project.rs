//! Project records: portfolio entries shown on the public site.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Archived")]
    Archived,
}

impl ProjectStatus {
    /// Stable string representation, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Archived => "Archived",
        }
    }

    /// Parse the serialized form. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// A login pair shared with a client for a demo environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// External links attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maquette: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<Credential>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_details: Option<Vec<String>>,
}

/// Every project field except the store-assigned id.
///
/// This is also the editor draft and the import unit: `Default` yields the
/// schema defaults used to seed a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectFields {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub description: String,
    pub image_url: String,
    pub images_url: Vec<String>,
    pub technologies: Vec<String>,
    pub tags: Vec<String>,
    pub links: ProjectLinks,
    pub status: ProjectStatus,
    pub created_at: Timestamp,
}

impl Default for ProjectFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: None,
            job: None,
            client: None,
            description: String::new(),
            image_url: String::new(),
            images_url: Vec::new(),
            technologies: Vec::new(),
            tags: Vec::new(),
            links: ProjectLinks::default(),
            status: ProjectStatus::default(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl ProjectFields {
    /// Check the fields required at save time.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("Title is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation("Description is required".into()));
        }
        Ok(())
    }

    /// Every asset URL this project references in object storage.
    pub fn asset_urls(&self) -> Vec<&str> {
        std::iter::once(self.image_url.as_str())
            .chain(self.images_url.iter().map(String::as_str))
            .filter(|u| !u.is_empty())
            .collect()
    }
}

/// A persisted project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: ProjectFields,
}

impl Project {
    /// Whether the public site lists this project.
    pub fn is_public(&self) -> bool {
        self.fields.status != ProjectStatus::Archived
    }
}
