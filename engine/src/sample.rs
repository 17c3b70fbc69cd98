//! The fixed demonstration form.

use quill_types::{
    Condition, ConditionId, ConditionOperator, Field, FieldId, FieldType,
};

/// Three fields: a required name, a required employment dropdown, and an
/// employer field shown only when the dropdown answers "Yes". Ids are stable
/// so reloading the sample is idempotent.
#[must_use]
pub(crate) fn sample_fields() -> Vec<Field> {
    vec![
        Field::from_parts(
            FieldId::new("field_1"),
            FieldType::Text,
            "First Name",
            true,
            Vec::new(),
            None,
        ),
        Field::from_parts(
            FieldId::new("field_2"),
            FieldType::Dropdown,
            "Are you employed?",
            true,
            vec!["Yes".to_owned(), "No".to_owned()],
            None,
        ),
        Field::from_parts(
            FieldId::new("field_3"),
            FieldType::Text,
            "Employer Name",
            true,
            Vec::new(),
            Some(Condition {
                id: ConditionId::new("condition_1"),
                target_field_id: FieldId::new("field_2"),
                operator: ConditionOperator::Equals,
                value: "Yes".to_owned(),
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use quill_types::{ConditionOperator, FieldId, FieldType};

    use super::sample_fields;

    #[test]
    fn sample_has_the_expected_shape() {
        let fields = sample_fields();
        assert_eq!(fields.len(), 3);

        assert_eq!(fields[0].field_type(), FieldType::Text);
        assert!(fields[0].required());

        assert_eq!(fields[1].field_type(), FieldType::Dropdown);
        assert_eq!(fields[1].options(), ["Yes", "No"]);

        let condition = fields[2].condition().expect("employer is conditional");
        assert_eq!(condition.target_field_id, FieldId::new("field_2"));
        assert_eq!(condition.operator, ConditionOperator::Equals);
        assert_eq!(condition.value, "Yes");
    }
}
