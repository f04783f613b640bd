//! Record editor state machine.
//!
//! ```text
//! Closed --open--> Editing{draft} --begin_save--> Saving{draft} --ok--> Closed
//!                     ^   |                          |
//!                     |   +-- validation error       +-- failure --> Editing{draft, error}
//!                     +---------- cancel (Editing only) --> Closed
//! ```
//!
//! The editor owns its draft exclusively. Opening an existing record clones
//! it, so discarding the draft never touches the committed copy.

use crate::assets::AssetKind;
use crate::audio::AudioFields;
use crate::error::CoreError;
use crate::project::ProjectFields;
use crate::types::RecordId;

/// A record type that can be edited through [`Editor`].
pub trait Draft: Clone + Default {
    /// Entity label used in messages.
    const ENTITY: &'static str;

    /// Asset slots this record accepts uploads for.
    const SLOTS: &'static [AssetKind];

    /// Synchronous pre-save validation. `pending` lists the asset slots
    /// that carry an upload with this save.
    fn validate(&self, pending: &[AssetKind]) -> Result<(), CoreError>;

    /// Current URL held in `slot`, if any.
    fn asset_url(&self, slot: AssetKind) -> Option<&str>;

    /// Point `slot` at a freshly uploaded asset. Ignored for foreign slots.
    fn set_asset_url(&mut self, slot: AssetKind, url: String);
}

impl Draft for ProjectFields {
    const ENTITY: &'static str = "Project";
    const SLOTS: &'static [AssetKind] = &[AssetKind::Image];

    fn validate(&self, _pending: &[AssetKind]) -> Result<(), CoreError> {
        ProjectFields::validate(self)
    }

    fn asset_url(&self, slot: AssetKind) -> Option<&str> {
        match slot {
            AssetKind::Image => Some(self.image_url.as_str()).filter(|u| !u.is_empty()),
            _ => None,
        }
    }

    fn set_asset_url(&mut self, slot: AssetKind, url: String) {
        if slot == AssetKind::Image {
            self.image_url = url;
        }
    }
}

impl Draft for AudioFields {
    const ENTITY: &'static str = "AudioFile";
    const SLOTS: &'static [AssetKind] = &[AssetKind::Audio, AssetKind::Cover];

    fn validate(&self, pending: &[AssetKind]) -> Result<(), CoreError> {
        AudioFields::validate(self, pending.contains(&AssetKind::Audio))
    }

    fn asset_url(&self, slot: AssetKind) -> Option<&str> {
        match slot {
            AssetKind::Audio => Some(self.file_url.as_str()).filter(|u| !u.is_empty()),
            AssetKind::Cover => self.cover_url.as_deref().filter(|u| !u.is_empty()),
            AssetKind::Image => None,
        }
    }

    fn set_asset_url(&mut self, slot: AssetKind, url: String) {
        match slot {
            AssetKind::Audio => self.file_url = url,
            AssetKind::Cover => self.cover_url = Some(url),
            AssetKind::Image => {}
        }
    }
}

/// Current editor state.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState<D> {
    Closed,
    Editing {
        draft: D,
        /// `None` while creating a new record.
        target: Option<RecordId>,
        error: Option<String>,
    },
    Saving {
        draft: D,
        target: Option<RecordId>,
    },
}

/// What a save has to persist, handed out by [`Editor::begin_save`].
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest<D> {
    pub draft: D,
    pub target: Option<RecordId>,
}

impl<D> SaveRequest<D> {
    pub fn is_new(&self) -> bool {
        self.target.is_none()
    }
}

/// Editor for a single record of type `D`.
#[derive(Debug, Clone)]
pub struct Editor<D> {
    state: EditorState<D>,
}

impl<D: Draft> Default for Editor<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Draft> Editor<D> {
    pub fn new() -> Self {
        Self {
            state: EditorState::Closed,
        }
    }

    pub fn state(&self) -> &EditorState<D> {
        &self.state
    }

    /// Start a new record seeded with schema defaults.
    pub fn open_new(&mut self) {
        self.state = EditorState::Editing {
            draft: D::default(),
            target: None,
            error: None,
        };
    }

    /// Start editing a copy of a stored record.
    pub fn open_existing(&mut self, id: RecordId, stored: &D) {
        self.state = EditorState::Editing {
            draft: stored.clone(),
            target: Some(id),
            error: None,
        };
    }

    /// Apply an edit to the draft. Only allowed while editing.
    pub fn edit(&mut self, f: impl FnOnce(&mut D)) -> Result<(), CoreError> {
        match &mut self.state {
            EditorState::Editing { draft, .. } => {
                f(draft);
                Ok(())
            }
            EditorState::Closed => Err(CoreError::Conflict(format!(
                "{} editor is not open",
                D::ENTITY
            ))),
            EditorState::Saving { .. } => Err(CoreError::Conflict(format!(
                "{} is being saved",
                D::ENTITY
            ))),
        }
    }

    /// Validate the draft and move to `Saving`.
    ///
    /// On validation failure the editor stays in `Editing` with the error
    /// recorded and nothing is handed out, so no network call can follow.
    /// A second call while already saving is rejected.
    pub fn begin_save(&mut self, pending: &[AssetKind]) -> Result<SaveRequest<D>, CoreError> {
        let (draft, target) = match std::mem::replace(&mut self.state, EditorState::Closed) {
            EditorState::Editing { draft, target, .. } => (draft, target),
            other @ EditorState::Saving { .. } => {
                self.state = other;
                return Err(CoreError::Conflict(format!(
                    "{} save already in progress",
                    D::ENTITY
                )));
            }
            EditorState::Closed => {
                return Err(CoreError::Conflict(format!(
                    "{} editor is not open",
                    D::ENTITY
                )));
            }
        };

        if let Err(e) = draft.validate(pending) {
            self.state = EditorState::Editing {
                draft,
                target,
                error: Some(validation_message(&e)),
            };
            return Err(e);
        }

        self.state = EditorState::Saving {
            draft: draft.clone(),
            target,
        };
        Ok(SaveRequest { draft, target })
    }

    /// Record the outcome of a save started with [`Editor::begin_save`].
    ///
    /// Success closes the editor; failure returns to `Editing` with the
    /// draft intact and the message attached.
    pub fn finish_save(&mut self, outcome: Result<RecordId, String>) {
        let EditorState::Saving { draft, target } =
            std::mem::replace(&mut self.state, EditorState::Closed)
        else {
            return;
        };
        if let Err(message) = outcome {
            self.state = EditorState::Editing {
                draft,
                target,
                error: Some(message),
            };
        }
    }

    /// Discard the draft. Ignored while a save is in flight, since the
    /// request itself cannot be aborted. Returns whether the editor closed.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            EditorState::Saving { .. } => false,
            _ => {
                self.state = EditorState::Closed;
                true
            }
        }
    }

    /// Error attached to the current draft, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            EditorState::Editing { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

fn validation_message(err: &CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}
