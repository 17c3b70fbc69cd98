//! Required-field validation and submission payload assembly.
//!
//! The engine here is stateless: it looks at the current fields and answers
//! and returns a discriminated outcome. The session decides what to store.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use quill_types::{AnswerSet, AnswerValue, Field, FieldId, FieldType};

use crate::visibility::is_visible;

/// Per-field validation messages, keyed by field id.
pub type ValidationErrors = BTreeMap<FieldId, String>;

/// One entry of an accepted submission, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedField {
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: AnswerValue,
}

/// An accepted submission: the visible fields' values plus a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub timestamp: String,
    pub fields: Vec<SubmittedField>,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(Submission),
    Rejected(ValidationErrors),
}

/// Format a timestamp the way submissions and saves carry it (RFC 3339 with
/// millisecond precision, UTC).
#[must_use]
pub(crate) fn rfc3339_millis(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Validate the visible fields and, when clean, build the payload.
///
/// Only visible fields are checked: a hidden required field neither errors
/// nor appears in the payload. A visible required field errors with
/// `"<label> is required"` when its answer is absent or counts as missing.
/// Missing answers of visible fields submit as the empty string.
#[must_use]
pub fn evaluate(fields: &[Field], answers: &AnswerSet, now: DateTime<Utc>) -> SubmitOutcome {
    let visible: Vec<&Field> = fields
        .iter()
        .filter(|field| is_visible(field, answers))
        .collect();

    let mut errors = ValidationErrors::new();
    for field in &visible {
        if !field.required() {
            continue;
        }
        let missing = answers
            .get(field.id())
            .is_none_or(AnswerValue::is_missing);
        if missing {
            errors.insert(
                field.id().clone(),
                format!("{} is required", field.label()),
            );
        }
    }

    if !errors.is_empty() {
        return SubmitOutcome::Rejected(errors);
    }

    let submitted = visible
        .into_iter()
        .map(|field| SubmittedField {
            id: field.id().clone(),
            label: field.label().to_owned(),
            field_type: field.field_type(),
            value: answers
                .get(field.id())
                .cloned()
                .unwrap_or_else(|| AnswerValue::Text(String::new())),
        })
        .collect();

    SubmitOutcome::Accepted(Submission {
        timestamp: rfc3339_millis(now),
        fields: submitted,
    })
}
