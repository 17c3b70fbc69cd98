//! Conditional-visibility evaluation.
//!
//! Visibility is evaluated independently per field: a field that is itself
//! hidden can still drive another field's condition, and the evaluator never
//! follows chains of conditions. A condition whose target no longer exists
//! reads an absent answer, which equals no real value.

use quill_types::{AnswerSet, Condition, ConditionOperator, Field};

/// Decide whether a field is shown, given the current answers.
///
/// Pure function of the field's condition and the answer set: no condition
/// means always visible.
#[must_use]
pub fn is_visible(field: &Field, answers: &AnswerSet) -> bool {
    match field.condition() {
        None => true,
        Some(condition) => condition_holds(condition, answers),
    }
}

fn condition_holds(condition: &Condition, answers: &AnswerSet) -> bool {
    let equals = answers
        .get(&condition.target_field_id)
        .is_some_and(|answer| answer.matches_text(&condition.value));
    match condition.operator {
        ConditionOperator::Equals => equals,
        ConditionOperator::NotEquals => !equals,
    }
}

/// Builder-facing summary of a condition against the current answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionStatus {
    /// Target or comparison value not chosen yet.
    Incomplete,
    /// The owning field will be shown.
    Met,
    /// The owning field will be hidden.
    NotMet,
}

/// Status banner input for the condition editor.
#[must_use]
pub fn condition_status(condition: &Condition, answers: &AnswerSet) -> ConditionStatus {
    if !condition.is_complete() {
        return ConditionStatus::Incomplete;
    }
    if condition_holds(condition, answers) {
        ConditionStatus::Met
    } else {
        ConditionStatus::NotMet
    }
}
