//! Core engine for Quill - the form-state machine.
//!
//! This crate contains the form-state engine without any rendering
//! dependencies, providing:
//!
//! - **Visibility**: the conditional-visibility evaluator ([`is_visible`])
//! - **Validation**: required-field checking and submission payload assembly
//! - **History**: linear undo/redo over configuration snapshots
//! - **Session**: the [`FormSession`] orchestrator that routes every mutation
//!   through history recording and autosaves through a [`FormStore`]
//!
//! # Architecture
//!
//! All mutating operations enter through [`FormSession`]. The session records
//! the pre-mutation snapshot, applies the change, then saves. Visibility and
//! validation are computed on demand from the current state; nothing is
//! pushed to the rendering collaborator.
//!
//! Failure policy: validation problems come back as a per-field error map,
//! structural misuse (removing the last option, creating a standalone
//! checkbox, undoing with an empty history) is a silent no-op, and
//! persistence trouble is logged and swallowed.

mod history;
mod sample;
mod session;
mod validation;
mod visibility;

pub use history::HistoryManager;
pub use session::FormSession;
pub use validation::{SubmitOutcome, Submission, SubmittedField, ValidationErrors};
pub use visibility::{ConditionStatus, condition_status, is_visible};

// Re-export the domain and store types hosts need.
pub use quill_store::{
    FormStore, JsonFileStore, MemoryStore, SavedForm, StoreError, default_store_path,
};
pub use quill_types::{
    AnswerSet, AnswerValue, Condition, ConditionId, ConditionOperator, ConditionPatch, Field,
    FieldId, FieldPatch, FieldType, FormConfig,
};
