//! In-memory store for tests and embedding.

use std::cell::{Cell, RefCell};

use quill_types::FormConfig;

use crate::{FormStore, SavedForm};

/// Keeps the last saved document in memory. Useful as a test double and for
/// hosts that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Option<SavedForm>>,
    save_count: Cell<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-seeded document, as if a previous session had saved.
    #[must_use]
    pub fn with_saved(form: SavedForm) -> Self {
        Self {
            saved: RefCell::new(Some(form)),
            save_count: Cell::new(0),
        }
    }

    /// The most recently saved document, if any.
    #[must_use]
    pub fn last_saved(&self) -> Option<SavedForm> {
        self.saved.borrow().clone()
    }

    /// How many times `save` has been called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl FormStore for MemoryStore {
    fn load(&self) -> Option<FormConfig> {
        self.saved.borrow().clone().map(SavedForm::into_config)
    }

    fn save(&self, form: &SavedForm) {
        *self.saved.borrow_mut() = Some(form.clone());
        self.save_count.set(self.save_count.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use quill_types::{Field, FieldType, FormConfig};

    use super::MemoryStore;
    use crate::{FormStore, SavedForm};

    #[test]
    fn empty_store_loads_none() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_records_document_and_count() {
        let store = MemoryStore::new();
        let config = FormConfig::new(
            vec![Field::create(FieldType::Text).unwrap()],
            Default::default(),
        );
        let saved = SavedForm::new(&config, "2024-01-01T00:00:00Z");

        store.save(&saved);
        store.save(&saved);

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.last_saved(), Some(saved));
        assert_eq!(store.load(), Some(config));
    }

    #[test]
    fn with_saved_seeds_a_previous_session() {
        let config = FormConfig::new(
            vec![Field::create(FieldType::Date).unwrap()],
            Default::default(),
        );
        let store = MemoryStore::with_saved(SavedForm::new(&config, "t"));
        assert_eq!(store.load(), Some(config));
        assert_eq!(store.save_count(), 0);
    }
}
