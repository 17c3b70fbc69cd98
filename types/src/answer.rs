//! Answer values and the per-form answer set.
//!
//! An answer's shape follows its field's kind: scalar text for
//! text/number/date/dropdown, a toggle for checkbox, an ordered selection
//! list for checkbox-group. This is a real sum type so required-field and
//! equality checks stay type-safe instead of poking at an untyped value.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::ids::FieldId;

/// A single field's current answer.
///
/// Serialized untagged, so the wire shape stays plain JSON: a string, a
/// boolean, or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Scalar answer for text, number, date, and dropdown fields.
    Text(String),
    /// Checkbox state.
    Toggle(bool),
    /// Checked entries of a checkbox-group, in check order.
    Selections(Vec<String>),
}

impl AnswerValue {
    /// Whether this answer counts as "not provided" for required-field
    /// validation: blank after trimming for text, unchecked for a toggle,
    /// empty for a selection list.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Toggle(checked) => !checked,
            AnswerValue::Selections(selected) => selected.is_empty(),
        }
    }

    /// Strict equality against a scalar condition value. Toggles and
    /// selection lists never equal a scalar, whole-value comparison only.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        matches!(self, AnswerValue::Text(text) if text == needle)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_owned())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Toggle(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::Selections(value)
    }
}

/// Current answers keyed by field id. Absence of a key means "unanswered."
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<FieldId, AnswerValue>);

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &FieldId) -> bool {
        self.0.contains_key(id)
    }

    pub fn insert(&mut self, id: FieldId, value: AnswerValue) {
        self.0.insert(id, value);
    }

    pub fn remove(&mut self, id: &FieldId) -> Option<AnswerValue> {
        self.0.remove(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FieldId, AnswerValue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = (&'a FieldId, &'a AnswerValue);
    type IntoIter = btree_map::Iter<'a, FieldId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(FieldId, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (FieldId, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
