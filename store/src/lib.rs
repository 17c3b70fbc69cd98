//! Persistence collaborator for Quill form configurations.
//!
//! The engine only needs a narrow contract: [`FormStore::save`] is invoked
//! after every state change and is fire-and-forget; [`FormStore::load`] is
//! invoked once at session start and must treat absent or malformed state as
//! "start empty", never as fatal.

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, STORE_FILENAME, StoreError, default_store_path};
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use quill_types::{AnswerSet, Field, FormConfig};

/// The persisted document: the form configuration plus the time it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedForm {
    pub fields: Vec<Field>,
    pub answers: AnswerSet,
    /// ISO-8601 save time. Informational; ignored on load.
    pub timestamp: String,
}

impl SavedForm {
    #[must_use]
    pub fn new(config: &FormConfig, timestamp: impl Into<String>) -> Self {
        Self {
            fields: config.fields.clone(),
            answers: config.answers.clone(),
            timestamp: timestamp.into(),
        }
    }

    #[must_use]
    pub fn into_config(self) -> FormConfig {
        FormConfig::new(self.fields, self.answers)
    }
}

/// Where the engine saves to and restores from.
pub trait FormStore {
    /// Restore the last saved configuration, or `None` when nothing usable is
    /// stored. Never fails; unusable state is discarded with a warning.
    fn load(&self) -> Option<FormConfig>;

    /// Persist the given document. Fire-and-forget: failures are logged and
    /// swallowed, the caller gets no acknowledgement.
    fn save(&self, form: &SavedForm);
}
