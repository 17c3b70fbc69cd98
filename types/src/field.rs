//! Field and condition entities and their type-specific invariants.
//!
//! A [`Field`] is one question in a form. Its kind is fixed at creation; its
//! label, required flag, options, and visibility condition are editable. The
//! "at most one condition per field" rule is encoded as an `Option`, not a
//! collection.

use serde::{Deserialize, Serialize};

use crate::ids::{ConditionId, FieldId};

/// The closed set of field kinds a form can contain.
///
/// `Checkbox` exists for rendering legacy configurations but is not a
/// creatable kind; new standalone checkboxes are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Number,
    Dropdown,
    Date,
    Checkbox,
    CheckboxGroup,
}

impl FieldType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Dropdown => "dropdown",
            FieldType::Date => "date",
            FieldType::Checkbox => "checkbox",
            FieldType::CheckboxGroup => "checkbox-group",
        }
    }

    /// Parse a wire name like `checkbox-group`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(FieldType::Text),
            "number" => Some(FieldType::Number),
            "dropdown" => Some(FieldType::Dropdown),
            "date" => Some(FieldType::Date),
            "checkbox" => Some(FieldType::Checkbox),
            "checkbox-group" => Some(FieldType::CheckboxGroup),
            _ => None,
        }
    }

    /// Whether users may create new fields of this kind.
    #[must_use]
    pub fn is_creatable(self) -> bool {
        !matches!(self, FieldType::Checkbox)
    }

    /// Whether this kind carries an options list.
    #[must_use]
    pub fn has_options(self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::CheckboxGroup)
    }

    /// Default label for a freshly created field of this kind.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            FieldType::Text => "New Text Field",
            FieldType::Number => "New Number Field",
            FieldType::Dropdown => "New Dropdown Field",
            FieldType::Date => "New Date Field",
            FieldType::Checkbox => "New Checkbox Field",
            FieldType::CheckboxGroup => "New Checkbox",
        }
    }

    /// Default options for a freshly created field of this kind.
    #[must_use]
    pub fn default_options(self) -> Vec<String> {
        if self.has_options() {
            vec!["Option 1".to_owned(), "Option 2".to_owned()]
        } else {
            Vec::new()
        }
    }
}

/// Comparison applied between a target field's answer and a condition value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    #[default]
    Equals,
    NotEquals,
}

impl ConditionOperator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "not_equals",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "equals" => Some(ConditionOperator::Equals),
            "not_equals" => Some(ConditionOperator::NotEquals),
            _ => None,
        }
    }
}

/// A visibility rule attached to a field: show the owner iff the target
/// field's current answer compares as requested against `value`.
///
/// A freshly created condition is incomplete (unset target, empty value).
/// The target must not be the owning field itself; that is the caller's
/// responsibility, and indirect cycles are not detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: ConditionId,
    pub target_field_id: FieldId,
    pub operator: ConditionOperator,
    pub value: String,
}

impl Condition {
    /// Build the default incomplete condition.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ConditionId::generate(),
            target_field_id: FieldId::unset(),
            operator: ConditionOperator::Equals,
            value: String::new(),
        }
    }

    /// Merge a partial update. Absent fields are left unchanged.
    pub fn apply(&mut self, patch: ConditionPatch) {
        if let Some(target) = patch.target_field_id {
            self.target_field_id = target;
        }
        if let Some(operator) = patch.operator {
            self.operator = operator;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
    }

    /// Whether both a target and a comparison value have been chosen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.target_field_id.is_unset() && !self.value.is_empty()
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a [`Condition`].
#[derive(Debug, Default, Clone)]
pub struct ConditionPatch {
    pub target_field_id: Option<FieldId>,
    pub operator: Option<ConditionOperator>,
    pub value: Option<String>,
}

/// One form question.
///
/// Fields are only created and destroyed through session operations. The kind
/// is immutable; everything else is edited through the methods below, which
/// preserve the type-specific invariants (an option-bearing field always
/// retains at least one option).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    id: FieldId,
    #[serde(rename = "type")]
    field_type: FieldType,
    label: String,
    required: bool,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    condition: Option<Condition>,
}

impl Field {
    /// Create a field of the given kind with a fresh id and kind defaults.
    ///
    /// Returns `None` for [`FieldType::Checkbox`]: standalone checkboxes are
    /// not a creatable kind, and the caller treats that as a no-op.
    #[must_use]
    pub fn create(field_type: FieldType) -> Option<Self> {
        if !field_type.is_creatable() {
            return None;
        }
        Some(Self {
            id: FieldId::generate(),
            field_type,
            label: field_type.default_label().to_owned(),
            required: false,
            options: field_type.default_options(),
            condition: None,
        })
    }

    /// Construct a field from parts, for fixed configurations such as the
    /// sample form and persisted state.
    #[must_use]
    pub fn from_parts(
        id: FieldId,
        field_type: FieldType,
        label: impl Into<String>,
        required: bool,
        options: Vec<String>,
        condition: Option<Condition>,
    ) -> Self {
        Self {
            id,
            field_type,
            label: label.into(),
            required,
            options,
            condition,
        }
    }

    #[must_use]
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    #[must_use]
    pub fn condition_mut(&mut self) -> Option<&mut Condition> {
        self.condition.as_mut()
    }

    /// Merge a partial update. The kind is never changed after creation.
    ///
    /// A wholesale options replacement that would leave an option-bearing
    /// field with no options is ignored.
    pub fn apply(&mut self, patch: FieldPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = patch.options
            && !(self.field_type.has_options() && options.is_empty())
        {
            self.options = options;
        }
    }

    /// Append a new option named after its position (`Option N`).
    pub fn add_option(&mut self) {
        let next = self.options.len() + 1;
        self.options.push(format!("Option {next}"));
    }

    /// Remove the option at `index`.
    ///
    /// Returns false (and leaves the options untouched) when the index is out
    /// of range or when removal would leave an option-bearing field with no
    /// options.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if index >= self.options.len() {
            return false;
        }
        if self.field_type.has_options() && self.options.len() == 1 {
            return false;
        }
        self.options.remove(index);
        true
    }

    /// Rename the option at `index`. Returns false when out of range.
    pub fn rename_option(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.options.get_mut(index) {
            Some(option) => {
                *option = text.into();
                true
            }
            None => false,
        }
    }

    /// Attach a condition, replacing any existing one (at most one per field).
    pub fn set_condition(&mut self, condition: Condition) {
        self.condition = Some(condition);
    }

    /// Detach the condition, if any.
    pub fn clear_condition(&mut self) {
        self.condition = None;
    }
}

/// Partial update for a [`Field`].
#[derive(Debug, Default, Clone)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
}
