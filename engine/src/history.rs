//! Linear undo/redo over form-configuration snapshots.
//!
//! Two stacks: `history` holds past states oldest-first, `future` holds
//! undone states nearest-undo-first. An ordinary mutation appends its
//! pre-state to `history` and empties `future`; only the guarded undo/redo
//! paths ever move entries between the two.
//!
//! Capacity is unbounded. There is no eviction policy.

use quill_types::FormConfig;

/// Suppresses history recording while a replay applies a snapshot.
///
/// Scoped acquisition: the flag is set on construction and cleared on drop,
/// so it is released on every exit path, including unwinding.
struct ReplayGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> ReplayGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for ReplayGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// Undo/redo stacks with an exactly-once push per external mutation.
#[derive(Debug, Default)]
pub struct HistoryManager {
    history: Vec<FormConfig>,
    future: Vec<FormConfig>,
    replaying: bool,
}

impl HistoryManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation snapshot.
    ///
    /// Call once per external mutating operation, with the state as it was
    /// before the mutation. Appends to `history` and clears `future`, unless
    /// an undo/redo replay is in progress.
    pub fn record(&mut self, snapshot: FormConfig) {
        if self.replaying {
            return;
        }
        self.history.push(snapshot);
        self.future.clear();
    }

    /// Swap the current state for the most recent history entry.
    ///
    /// The displaced current state moves to the front of `future`. No-op on
    /// an empty history; returns whether a swap happened.
    pub fn undo(&mut self, current: &mut FormConfig) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        let _replay = ReplayGuard::engage(&mut self.replaying);
        let displaced = std::mem::replace(current, entry);
        self.future.insert(0, displaced);
        true
    }

    /// Symmetric to [`undo`](Self::undo): swap the current state for the
    /// front of `future`, moving the displaced state to the back of
    /// `history`. No-op when nothing has been undone.
    pub fn redo(&mut self, current: &mut FormConfig) -> bool {
        if self.future.is_empty() {
            return false;
        }
        let entry = self.future.remove(0);
        let _replay = ReplayGuard::engage(&mut self.replaying);
        let displaced = std::mem::replace(current, entry);
        self.history.push(displaced);
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[cfg(test)]
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use quill_types::{AnswerValue, Field, FieldId, FieldType, FormConfig};

    use super::HistoryManager;

    fn config_with_answer(value: &str) -> FormConfig {
        let mut config = FormConfig::default();
        config
            .answers
            .insert(FieldId::new("field_1"), AnswerValue::from(value));
        config
    }

    #[test]
    fn undo_with_empty_history_is_a_no_op() {
        let mut manager = HistoryManager::new();
        let mut current = config_with_answer("a");
        assert!(!manager.undo(&mut current));
        assert_eq!(current, config_with_answer("a"));
    }

    #[test]
    fn redo_with_empty_future_is_a_no_op() {
        let mut manager = HistoryManager::new();
        let mut current = config_with_answer("a");
        assert!(!manager.redo(&mut current));
        assert_eq!(current, config_with_answer("a"));
    }

    #[test]
    fn undo_then_redo_round_trips_the_state() {
        let mut manager = HistoryManager::new();
        let before = config_with_answer("before");
        let mut current = before.clone();

        // Mutation: record pre-state, then change.
        manager.record(current.clone());
        current = config_with_answer("after");

        assert!(manager.undo(&mut current));
        assert_eq!(current, before);

        assert!(manager.redo(&mut current));
        assert_eq!(current, config_with_answer("after"));
    }

    #[test]
    fn recording_clears_the_redo_stack() {
        let mut manager = HistoryManager::new();
        let mut current = config_with_answer("a");

        manager.record(current.clone());
        current = config_with_answer("b");
        manager.undo(&mut current);
        assert!(manager.can_redo());

        manager.record(current.clone());
        assert!(!manager.can_redo());
        assert_eq!(manager.future_len(), 0);
    }

    #[test]
    fn undo_moves_entries_between_stacks_in_order() {
        let mut manager = HistoryManager::new();
        let mut current = config_with_answer("v1");

        manager.record(current.clone());
        current = config_with_answer("v2");
        manager.record(current.clone());
        current = config_with_answer("v3");

        assert_eq!(manager.history_len(), 2);

        manager.undo(&mut current);
        assert_eq!(current, config_with_answer("v2"));
        manager.undo(&mut current);
        assert_eq!(current, config_with_answer("v1"));
        assert!(!manager.can_undo());
        assert_eq!(manager.future_len(), 2);

        manager.redo(&mut current);
        assert_eq!(current, config_with_answer("v2"));
        manager.redo(&mut current);
        assert_eq!(current, config_with_answer("v3"));
        assert!(!manager.can_redo());
    }

    #[test]
    fn replay_guard_is_released_after_undo_and_redo() {
        let mut manager = HistoryManager::new();
        let mut current = FormConfig::default();

        manager.record(current.clone());
        current
            .answers
            .insert(FieldId::new("field_1"), AnswerValue::from("x"));
        manager.undo(&mut current);

        // Recording works again: the guard did not stick.
        manager.record(current.clone());
        assert_eq!(manager.history_len(), 1);

        manager.undo(&mut current);
        manager.redo(&mut current);
        manager.record(current.clone());
        assert!(manager.can_undo());
    }

    #[test]
    fn snapshots_capture_fields_and_answers_together() {
        let mut manager = HistoryManager::new();
        let field = Field::create(FieldType::Text).unwrap();
        let id = field.id().clone();
        let mut current = FormConfig::new(vec![field], Default::default());
        current.answers.insert(id.clone(), AnswerValue::from("x"));

        let before = current.clone();
        manager.record(current.clone());
        current.fields.clear();
        current.answers.remove(&id);

        manager.undo(&mut current);
        assert_eq!(current, before);
        assert_eq!(current.fields.len(), 1);
        assert!(current.answers.contains(&id));
    }
}
