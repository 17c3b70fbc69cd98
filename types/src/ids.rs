use std::fmt;

use uuid::Uuid;

/// Opaque identifier for a form field, stable for the field's lifetime.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh unique id.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("field_{}", Uuid::new_v4().simple()))
    }

    /// An unset id. Used by incomplete conditions whose target has not been
    /// chosen yet.
    #[must_use]
    pub fn unset() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a visibility condition.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ConditionId(String);

impl ConditionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh unique id.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("condition_{}", Uuid::new_v4().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConditionId, FieldId};

    #[test]
    fn generated_field_ids_are_unique() {
        let a = FieldId::generate();
        let b = FieldId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("field_"));
    }

    #[test]
    fn generated_condition_ids_are_unique() {
        let a = ConditionId::generate();
        let b = ConditionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("condition_"));
    }

    #[test]
    fn unset_field_id_is_empty() {
        let id = FieldId::unset();
        assert!(id.is_unset());
        assert_eq!(id.as_str(), "");
        assert!(!FieldId::new("field_1").is_unset());
    }

    #[test]
    fn field_id_serializes_as_bare_string() {
        let id = FieldId::new("field_1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"field_1\"");
        let back: FieldId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
