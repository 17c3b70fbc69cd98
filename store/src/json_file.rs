//! JSON file store with crash-safe writes.
//!
//! Writes go to a temp file in the destination directory and are renamed over
//! the target, so a crash mid-write never leaves a truncated document behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use quill_types::FormConfig;

use crate::{FormStore, SavedForm};

/// Filename for the saved form document.
pub const STORE_FILENAME: &str = "form.json";

/// Default location for the saved form: `~/.quill/form.json`.
#[must_use]
pub fn default_store_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quill").join(STORE_FILENAME))
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read saved form at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse saved form at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write saved form at {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            StoreError::Read { path, .. }
            | StoreError::Parse { path, .. }
            | StoreError::Write { path, .. } => path,
        }
    }
}

/// Stores the form as a single JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the saved document. A missing file is `Ok(None)`.
    pub fn try_load(&self) -> Result<Option<SavedForm>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let saved = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(saved))
    }

    /// Serialize and atomically replace the document on disk.
    pub fn write(&self, form: &SavedForm) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(write_err)?;

        let serialized =
            serde_json::to_vec_pretty(form).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, source),
            })?;

        // Temp file in the same directory so the final rename stays on one
        // filesystem.
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(&serialized).map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

impl FormStore for JsonFileStore {
    fn load(&self) -> Option<FormConfig> {
        match self.try_load() {
            Ok(saved) => saved.map(SavedForm::into_config),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "discarding saved form: {err}");
                None
            }
        }
    }

    fn save(&self, form: &SavedForm) {
        if let Err(err) = self.write(form) {
            tracing::warn!(path = %self.path.display(), "failed to save form: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use quill_types::{AnswerValue, Field, FieldId, FieldType, FormConfig};

    use super::{JsonFileStore, StoreError};
    use crate::{FormStore, SavedForm};

    fn sample_saved() -> SavedForm {
        let field = Field::create(FieldType::Dropdown).unwrap();
        let mut config = FormConfig::new(vec![field], Default::default());
        let id = config.fields[0].id().clone();
        config.answers.insert(id, AnswerValue::from("Option 1"));
        SavedForm::new(&config, "2024-06-01T12:00:00Z")
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("form.json"));

        let saved = sample_saved();
        store.save(&saved);

        let loaded = store.try_load().unwrap().expect("document on disk");
        assert_eq!(loaded, saved);
        assert_eq!(store.load(), Some(saved.into_config()));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("form.json"));

        assert!(store.try_load().unwrap().is_none());
        assert!(store.load().is_none());
    }

    #[test]
    fn malformed_document_is_discarded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.try_load(),
            Err(StoreError::Parse { .. })
        ));
        // The trait contract degrades the error to "start empty".
        assert!(store.load().is_none());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("form.json"));

        store.save(&sample_saved());
        assert!(store.path().exists());
    }

    #[test]
    fn save_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("form.json"));

        store.save(&sample_saved());

        let mut second = sample_saved();
        second.answers.insert(
            FieldId::new("field_extra"),
            AnswerValue::from(true),
        );
        store.save(&second);

        let loaded = store.try_load().unwrap().unwrap();
        assert_eq!(loaded, second);
    }

    #[test]
    fn store_error_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, "]").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.try_load().unwrap_err();
        assert_eq!(err.path(), path.as_path());
    }
}
