//! Core domain types for Quill.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies: fields, conditions, answers, and the form configuration that
//! the engine snapshots and the store persists.

mod answer;
mod field;
mod form;
mod ids;

pub use answer::{AnswerSet, AnswerValue};
pub use field::{
    Condition, ConditionOperator, ConditionPatch, Field, FieldPatch, FieldType,
};
pub use form::FormConfig;
pub use ids::{ConditionId, FieldId};
