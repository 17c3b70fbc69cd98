//! The form session: field CRUD, condition CRUD, answers, submission, and
//! undo/redo, with every mutation recorded and autosaved.
//!
//! Mutation discipline: capture the pre-state, apply the change, record the
//! capture, save. Operations that turn out to be structural misuse (unknown
//! id, removing a last option, creating a standalone checkbox) return before
//! recording, so they leave history, the redo stack, and the store untouched.

use chrono::Utc;

use quill_store::{FormStore, SavedForm};
use quill_types::{
    AnswerSet, AnswerValue, Condition, ConditionPatch, Field, FieldId, FieldPatch, FieldType,
    FormConfig,
};

use crate::history::HistoryManager;
use crate::sample::sample_fields;
use crate::validation::{self, SubmitOutcome, Submission, ValidationErrors};
use crate::visibility::is_visible;

/// Orchestrates one form configuration over one store.
///
/// The rendering collaborator reads state through the accessors and issues
/// the operations below; it never mutates fields or conditions directly.
pub struct FormSession<S: FormStore> {
    form: FormConfig,
    history: HistoryManager,
    errors: ValidationErrors,
    submission: Option<Submission>,
    store: S,
}

impl<S: FormStore> FormSession<S> {
    /// Start a session, restoring the last saved configuration if the store
    /// has a usable one. Absent or malformed state starts empty.
    pub fn new(store: S) -> Self {
        let form = store.load().unwrap_or_default();
        if !form.is_empty() {
            tracing::debug!(
                fields = form.fields.len(),
                answers = form.answers.len(),
                "restored saved form"
            );
        }
        Self {
            form,
            history: HistoryManager::new(),
            errors: ValidationErrors::new(),
            submission: None,
            store,
        }
    }

    // ------------------------------------------------------------------
    // Field CRUD
    // ------------------------------------------------------------------

    /// Append a new field of the given kind and return its id.
    ///
    /// Returns `None` without touching anything for [`FieldType::Checkbox`]:
    /// standalone checkboxes are not creatable.
    pub fn add_field(&mut self, field_type: FieldType) -> Option<FieldId> {
        let field = Field::create(field_type)?;
        let id = field.id().clone();
        self.history.record(self.form.clone());
        self.form.fields.push(field);
        self.autosave();
        Some(id)
    }

    /// Merge a partial update into a field. Unknown id is a no-op.
    pub fn update_field(&mut self, id: &FieldId, patch: FieldPatch) {
        let before = self.form.clone();
        let Some(field) = self.form.field_mut(id) else {
            return;
        };
        field.apply(patch);
        self.history.record(before);
        self.autosave();
    }

    /// Remove a field and its answer under a single history snapshot, so one
    /// undo restores both.
    ///
    /// Conditions on other fields that reference the removed id are left in
    /// place; the evaluator then reads an absent answer.
    pub fn remove_field(&mut self, id: &FieldId) {
        if self.form.field(id).is_none() {
            return;
        }
        self.history.record(self.form.clone());
        self.form.fields.retain(|field| field.id() != id);
        self.form.answers.remove(id);
        self.autosave();
    }

    // ------------------------------------------------------------------
    // Options
    // ------------------------------------------------------------------

    /// Append an option to a field's list.
    pub fn add_option(&mut self, id: &FieldId) {
        let before = self.form.clone();
        let Some(field) = self.form.field_mut(id) else {
            return;
        };
        field.add_option();
        self.history.record(before);
        self.autosave();
    }

    /// Remove an option. Removing the last remaining option of an
    /// option-bearing field is rejected and nothing changes.
    pub fn remove_option(&mut self, id: &FieldId, index: usize) {
        let before = self.form.clone();
        let Some(field) = self.form.field_mut(id) else {
            return;
        };
        if !field.remove_option(index) {
            return;
        }
        self.history.record(before);
        self.autosave();
    }

    /// Rename an option in place.
    pub fn rename_option(&mut self, id: &FieldId, index: usize, text: impl Into<String>) {
        let before = self.form.clone();
        let Some(field) = self.form.field_mut(id) else {
            return;
        };
        if !field.rename_option(index, text) {
            return;
        }
        self.history.record(before);
        self.autosave();
    }

    // ------------------------------------------------------------------
    // Conditions
    // ------------------------------------------------------------------

    /// Attach the default incomplete condition to a field, replacing any
    /// existing one (at most one condition per field).
    pub fn add_condition(&mut self, id: &FieldId) {
        let before = self.form.clone();
        let Some(field) = self.form.field_mut(id) else {
            return;
        };
        field.set_condition(Condition::new());
        self.history.record(before);
        self.autosave();
    }

    /// Merge a partial update into a field's condition. A field without a
    /// condition is a no-op.
    pub fn update_condition(&mut self, id: &FieldId, patch: ConditionPatch) {
        let before = self.form.clone();
        let Some(condition) = self.form.field_mut(id).and_then(Field::condition_mut) else {
            return;
        };
        condition.apply(patch);
        self.history.record(before);
        self.autosave();
    }

    /// Detach a field's condition, if it has one.
    pub fn remove_condition(&mut self, id: &FieldId) {
        let before = self.form.clone();
        let Some(field) = self.form.field_mut(id) else {
            return;
        };
        if field.condition().is_none() {
            return;
        }
        field.clear_condition();
        self.history.record(before);
        self.autosave();
    }

    // ------------------------------------------------------------------
    // Answers & submission
    // ------------------------------------------------------------------

    /// Set the current answer for a field.
    pub fn update_answer(&mut self, id: &FieldId, value: impl Into<AnswerValue>) {
        self.history.record(self.form.clone());
        self.form.answers.insert(id.clone(), value.into());
        self.autosave();
    }

    /// Validate the visible fields and build the payload when clean.
    ///
    /// Rejection stores the error map and leaves any previous submission
    /// untouched; acceptance stores the payload and clears stale errors.
    /// The snapshot pair does not change, so nothing is recorded.
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = validation::evaluate(&self.form.fields, &self.form.answers, Utc::now());
        match &outcome {
            SubmitOutcome::Rejected(errors) => {
                self.errors = errors.clone();
            }
            SubmitOutcome::Accepted(submission) => {
                self.submission = Some(submission.clone());
                self.errors.clear();
            }
        }
        outcome
    }

    /// Dismiss the last accepted submission without touching form state.
    pub fn clear_submission(&mut self) {
        self.submission = None;
    }

    // ------------------------------------------------------------------
    // Whole-form operations
    // ------------------------------------------------------------------

    /// Reset fields, answers, submission, and errors under one snapshot.
    pub fn clear(&mut self) {
        self.history.record(self.form.clone());
        self.form = FormConfig::default();
        self.submission = None;
        self.errors.clear();
        self.autosave();
    }

    /// Replace the whole configuration with the demonstration form.
    pub fn load_sample(&mut self) {
        self.history.record(self.form.clone());
        self.form = FormConfig::new(sample_fields(), AnswerSet::new());
        self.submission = None;
        self.errors.clear();
        self.autosave();
    }

    /// Restore the state before the last mutation. No-op on empty history.
    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.form);
        if applied {
            self.autosave();
        }
        applied
    }

    /// Reapply the most recently undone mutation. No-op when nothing has
    /// been undone.
    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo(&mut self.form);
        if applied {
            self.autosave();
        }
        applied
    }

    // ------------------------------------------------------------------
    // Reads for the rendering collaborator
    // ------------------------------------------------------------------

    #[must_use]
    pub fn form(&self) -> &FormConfig {
        &self.form
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.form.fields
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.form.answers
    }

    /// Visibility of one field under the current answers.
    #[must_use]
    pub fn is_field_visible(&self, field: &Field) -> bool {
        is_visible(field, &self.form.answers)
    }

    /// The fields currently shown, in display order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.form
            .fields
            .iter()
            .filter(|field| is_visible(field, &self.form.answers))
    }

    #[must_use]
    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the current configuration, stamped with the save time.
    /// Fire-and-forget per the store contract.
    fn autosave(&self) {
        let timestamp = validation::rfc3339_millis(Utc::now());
        self.store.save(&SavedForm::new(&self.form, timestamp));
    }
}
