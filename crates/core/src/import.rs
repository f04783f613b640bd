//! Bulk JSON import: parsing, normalization and the import state machine.
//!
//! ```text
//! Select --load ok--> Preview --start--> Importing{current,total} --finish--> Complete
//!   ^        |           |                                                       |
//!   |        +-- error --+ back                                                  |
//!   +--------------------------------- close -----------------------------------+
//! ```
//!
//! Records are created one at a time, in input order. A failing record is
//! recorded against its title and the batch carries on.

use serde::Serialize;
use serde_json::{json, Value};

use crate::audio::AudioFields;
use crate::error::CoreError;
use crate::project::ProjectFields;
use crate::schema::{audio_fields_from_document, project_fields_from_document};

/// A record type accepted by the bulk importer.
pub trait ImportRecord: Sized + Clone + Serialize {
    /// Prefix of the synthetic title given to records without one.
    const TITLE_PREFIX: &'static str;

    /// Normalize one input element, filling every missing field with its
    /// default. `position` is 1-based.
    fn normalize(element: &Value, position: usize) -> Result<Self, CoreError>;

    /// Reject element values that normalization would silently replace
    /// with a default. Reported per item when the batch runs.
    fn check_element(_element: &Value) -> Result<(), CoreError> {
        Ok(())
    }

    fn title(&self) -> &str;
}

fn synthetic_title(prefix: &str, position: usize, title: &mut String) {
    if title.trim().is_empty() {
        *title = format!("{prefix} {position}");
    }
}

fn element_must_be_object(element: &Value, position: usize) -> Result<(), CoreError> {
    if element.is_object() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Item {position} is not a JSON object"
        )))
    }
}

/// A present `status` must be one of `allowed`.
fn known_status(element: &Value, allowed: &[&str]) -> Result<(), CoreError> {
    match element.get("status") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(s)) if allowed.contains(&s.as_str()) => Ok(()),
        Some(other) => Err(CoreError::Validation(format!(
            "Unknown status {other}. Must be one of: {}",
            allowed.join(", ")
        ))),
    }
}

impl ImportRecord for ProjectFields {
    const TITLE_PREFIX: &'static str = "Projet";

    fn normalize(element: &Value, position: usize) -> Result<Self, CoreError> {
        element_must_be_object(element, position)?;
        let mut fields = project_fields_from_document(element, chrono::Utc::now())?;
        synthetic_title(Self::TITLE_PREFIX, position, &mut fields.title);
        Ok(fields)
    }

    fn check_element(element: &Value) -> Result<(), CoreError> {
        known_status(element, &["In Progress", "Completed", "Archived"])
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl ImportRecord for AudioFields {
    const TITLE_PREFIX: &'static str = "Audio";

    fn normalize(element: &Value, position: usize) -> Result<Self, CoreError> {
        element_must_be_object(element, position)?;
        let mut fields = audio_fields_from_document(element, chrono::Utc::now())?;
        synthetic_title(Self::TITLE_PREFIX, position, &mut fields.title);
        Ok(fields)
    }

    fn check_element(element: &Value) -> Result<(), CoreError> {
        known_status(element, &["Processing", "Published", "Archived"])
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// Decode import text into its raw elements.
///
/// The text must decode to a JSON array.
pub fn import_elements(input: &str) -> Result<Vec<Value>, CoreError> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| CoreError::Validation(format!("Invalid JSON: {e}")))?;

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(CoreError::Validation(
            "The JSON must be an array of records".into(),
        )),
    }
}

/// Parse import text into normalized records.
///
/// The text must decode to a JSON array whose elements are objects.
pub fn parse_import<R: ImportRecord>(input: &str) -> Result<Vec<R>, CoreError> {
    import_elements(input)?
        .iter()
        .enumerate()
        .map(|(i, element)| R::normalize(element, i + 1))
        .collect()
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Progress through an import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportProgress {
    pub current: usize,
    pub total: usize,
}

/// Final outcome of an import batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub success_count: usize,
    pub total: usize,
    /// One `"{title}: {message}"` entry per failed record, in input order.
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportState<R> {
    Select {
        error: Option<String>,
    },
    Preview {
        records: Vec<R>,
    },
    Importing {
        progress: ImportProgress,
        success_count: usize,
        errors: Vec<String>,
    },
    Complete(ImportReport),
}

/// One bulk import, driven by the caller through its states.
#[derive(Debug, Clone)]
pub struct ImportSession<R> {
    state: ImportState<R>,
}

impl<R: ImportRecord> Default for ImportSession<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ImportRecord> ImportSession<R> {
    pub fn new() -> Self {
        Self {
            state: ImportState::Select { error: None },
        }
    }

    pub fn state(&self) -> &ImportState<R> {
        &self.state
    }

    /// Parse pasted or uploaded text. On success the session previews the
    /// normalized records and returns how many there are; on failure it
    /// stays in `Select` with the error.
    pub fn load(&mut self, input: &str) -> Result<usize, CoreError> {
        if !matches!(self.state, ImportState::Select { .. }) {
            return Err(CoreError::Conflict("Import already loaded".into()));
        }
        match parse_import::<R>(input) {
            Ok(records) => {
                let count = records.len();
                self.state = ImportState::Preview { records };
                Ok(count)
            }
            Err(e) => {
                self.state = ImportState::Select {
                    error: Some(e.to_string()),
                };
                Err(e)
            }
        }
    }

    /// Records awaiting confirmation, while previewing.
    pub fn preview(&self) -> Option<&[R]> {
        match &self.state {
            ImportState::Preview { records } => Some(records),
            _ => None,
        }
    }

    /// Abort the preview and go back to input selection.
    pub fn back(&mut self) {
        if matches!(self.state, ImportState::Preview { .. }) {
            self.state = ImportState::Select { error: None };
        }
    }

    /// Commit the previewed records. Returns them in input order for the
    /// caller to create one by one.
    pub fn start(&mut self) -> Result<Vec<R>, CoreError> {
        if !matches!(self.state, ImportState::Preview { .. }) {
            return Err(CoreError::Conflict("Nothing to import".into()));
        }
        let ImportState::Preview { records } =
            std::mem::replace(&mut self.state, ImportState::Select { error: None })
        else {
            return Err(CoreError::Conflict("Nothing to import".into()));
        };
        self.state = ImportState::Importing {
            progress: ImportProgress {
                current: 0,
                total: records.len(),
            },
            success_count: 0,
            errors: Vec::new(),
        };
        Ok(records)
    }

    /// Record the outcome of one create attempt and advance progress.
    pub fn record(&mut self, title: &str, outcome: Result<(), String>) -> Option<ImportProgress> {
        let ImportState::Importing {
            progress,
            success_count,
            errors,
        } = &mut self.state
        else {
            return None;
        };
        match outcome {
            Ok(()) => *success_count += 1,
            Err(message) => errors.push(format!("{title}: {message}")),
        }
        progress.current += 1;
        Some(*progress)
    }

    /// Close the batch and report.
    pub fn finish(&mut self) -> Option<ImportReport> {
        if !matches!(self.state, ImportState::Importing { .. }) {
            return None;
        }
        let ImportState::Importing {
            progress,
            success_count,
            errors,
        } = std::mem::replace(&mut self.state, ImportState::Select { error: None })
        else {
            return None;
        };
        let report = ImportReport {
            success_count,
            total: progress.total,
            errors,
        };
        self.state = ImportState::Complete(report.clone());
        Some(report)
    }

    /// Leave the completed state, ready for another batch.
    pub fn close(&mut self) {
        if matches!(self.state, ImportState::Complete(_)) {
            self.state = ImportState::Select { error: None };
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Example project import file illustrating every optional field.
pub fn project_template() -> Value {
    json!([
        {
            "title": "Site vitrine Atelier Lumiere",
            "subtitle": "Refonte complete",
            "job": "Developpement front-end",
            "client": "Atelier Lumiere",
            "description": "Conception et developpement du site vitrine.",
            "imageUrl": "https://example.com/images/atelier.png",
            "imagesUrl": [
                "https://example.com/images/atelier-1.png",
                "https://example.com/images/atelier-2.png"
            ],
            "technologies": ["Next.js", "Tailwind CSS"],
            "tags": ["vitrine", "responsive"],
            "links": {
                "app_link": "https://atelier-lumiere.example.com",
                "repository": "https://github.com/example/atelier",
                "maquette": "https://figma.com/file/example",
                "credentials": [
                    { "email": "demo@example.com", "password": "demo1234" }
                ],
                "conversion_details": ["+35% de demandes de devis"]
            },
            "status": "Completed",
            "createdAt": "2024-01-15T09:00:00.000Z"
        },
        {
            "title": "Application de reservation",
            "description": "Projet minimal: seuls le titre et la description sont renseignes.",
            "status": "In Progress"
        }
    ])
}

/// Example audio import file illustrating every optional field.
pub fn audio_template() -> Value {
    json!([
        {
            "title": "Jingle Radio Locale",
            "description": "Habillage sonore de 15 secondes.",
            "artist": "Studio Vitrine",
            "category": "Jingle",
            "fileUrl": "https://example.com/audio/jingle.mp3",
            "coverUrl": "https://example.com/audio/covers/jingle.png",
            "duration": 15,
            "status": "Published",
            "createdAt": "2024-02-01T12:00:00.000Z"
        }
    ])
}
