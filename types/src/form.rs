//! The form configuration: the ordered fields plus the answer set.
//!
//! This pair is the unit of undo/redo snapshotting and the unit of
//! persistence. Field order is display order; there is no reorder operation.

use serde::{Deserialize, Serialize};

use crate::answer::AnswerSet;
use crate::field::Field;
use crate::ids::FieldId;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    pub fields: Vec<Field>,
    pub answers: AnswerSet,
}

impl FormConfig {
    #[must_use]
    pub fn new(fields: Vec<Field>, answers: AnswerSet) -> Self {
        Self { fields, answers }
    }

    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|field| field.id() == id)
    }

    #[must_use]
    pub fn field_mut(&mut self, id: &FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::FormConfig;
    use crate::answer::AnswerValue;
    use crate::field::{Field, FieldType};

    #[test]
    fn field_lookup_by_id() {
        let field = Field::create(FieldType::Text).unwrap();
        let id = field.id().clone();
        let mut form = FormConfig::new(vec![field], Default::default());

        assert!(form.field(&id).is_some());
        assert!(form.field_mut(&id).is_some());
        assert!(form.field(&crate::FieldId::new("missing")).is_none());
    }

    #[test]
    fn empty_when_no_fields_and_no_answers() {
        let mut form = FormConfig::default();
        assert!(form.is_empty());

        form.answers
            .insert(crate::FieldId::new("field_1"), AnswerValue::from("x"));
        assert!(!form.is_empty());
    }
}
