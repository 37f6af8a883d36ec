use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::{Question, QuestionId, QuestionType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no question with id `{0}` in the store")]
    UnknownQuestion(QuestionId),
    #[error("a question with id `{0}` already exists")]
    DuplicateId(QuestionId),
    #[error("question `{id}` is a {stored} question and cannot become {requested}")]
    TypeChanged {
        id: QuestionId,
        stored: QuestionType,
        requested: QuestionType,
    },
}

/// Ordered questions plus the selection pointer.
///
/// Selection is held as an id and always resolved through the store, so the
/// selected question and its store entry can never diverge.
#[derive(Debug, Default)]
pub struct QuestionStore {
    questions: IndexMap<QuestionId, Question>,
    selected: Option<QuestionId>,
    numbers: IndexMap<QuestionId, Option<usize>>,
    revision: u64,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_questions(
        questions: impl IntoIterator<Item = Question>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for question in questions {
            store.add_question(question)?;
        }
        let first = store.questions.keys().next().cloned();
        store.selected = first;
        Ok(store)
    }

    /// Appends `question` and selects it.
    pub fn add_question(&mut self, question: Question) -> Result<(), StoreError> {
        let id = question.id().clone();
        if self.questions.contains_key(&id) {
            warn!(question_id = %id, "rejected add of duplicate question id");
            return Err(StoreError::DuplicateId(id));
        }
        debug!(question_id = %id, kind = %question.kind(), "question added");
        self.questions.insert(id.clone(), question);
        self.selected = Some(id);
        self.structure_changed();
        Ok(())
    }

    /// Replaces the entry with the same id; every other entry is untouched.
    pub fn update_question(&mut self, question: Question) -> Result<(), StoreError> {
        let id = question.id().clone();
        let Some(slot) = self.questions.get_mut(&id) else {
            warn!(question_id = %id, "update for a question that is not in the store");
            return Err(StoreError::UnknownQuestion(id));
        };
        if slot.kind() != question.kind() {
            warn!(question_id = %id, "update attempted to change question type");
            return Err(StoreError::TypeChanged {
                stored: slot.kind().clone(),
                requested: question.kind().clone(),
                id,
            });
        }
        if *slot != question {
            *slot = question;
            self.revision += 1;
            debug!(question_id = %id, revision = self.revision, "question updated");
        }
        Ok(())
    }

    /// Removes the question. If it was selected, selection falls back to the
    /// first remaining question, or to none.
    pub fn delete_question(&mut self, id: &QuestionId) -> Result<Question, StoreError> {
        let Some(removed) = self.questions.shift_remove(id) else {
            warn!(question_id = %id, "delete for a question that is not in the store");
            return Err(StoreError::UnknownQuestion(id.clone()));
        };
        if self.selected.as_ref() == Some(id) {
            self.selected = self.questions.keys().next().cloned();
        }
        debug!(question_id = %id, "question deleted");
        self.structure_changed();
        Ok(removed)
    }

    /// Moves a question to `index` (clamped to the end).
    pub fn move_question(&mut self, id: &QuestionId, index: usize) -> Result<(), StoreError> {
        let Some(from) = self.questions.get_index_of(id) else {
            warn!(question_id = %id, "move for a question that is not in the store");
            return Err(StoreError::UnknownQuestion(id.clone()));
        };
        let to = index.min(self.questions.len().saturating_sub(1));
        if from != to {
            self.questions.move_index(from, to);
            self.structure_changed();
        }
        Ok(())
    }

    pub fn selected(&self) -> Option<&Question> {
        self.selected.as_ref().and_then(|id| self.questions.get(id))
    }

    pub fn selected_id(&self) -> Option<&QuestionId> {
        self.selected.as_ref()
    }

    pub fn set_selected(&mut self, id: &QuestionId) -> Result<(), StoreError> {
        if !self.questions.contains_key(id) {
            warn!(question_id = %id, "selection of a question that is not in the store");
            return Err(StoreError::UnknownQuestion(id.clone()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.get(id)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.questions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Display number of a question; `None` for the welcome screen or an unknown id.
    pub fn number_of(&self, id: &QuestionId) -> Option<usize> {
        self.numbers.get(id).copied().flatten()
    }

    /// Display numbers for every question, in store order.
    pub fn numbering(&self) -> impl Iterator<Item = (&QuestionId, Option<usize>)> {
        self.numbers.iter().map(|(id, number)| (id, *number))
    }

    /// Bumped on every effective mutation; consumers compare it to skip re-renders.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn structure_changed(&mut self) {
        self.numbers = derive_numbers(&self.questions);
        self.revision += 1;
    }
}

fn derive_numbers(questions: &IndexMap<QuestionId, Question>) -> IndexMap<QuestionId, Option<usize>> {
    let mut preceding = 0;
    questions
        .iter()
        .map(|(id, question)| {
            if question.kind().is_welcome() {
                return (id.clone(), None);
            }
            preceding += 1;
            (id.clone(), Some(preceding))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{QuestionStore, StoreError};
    use crate::core::{Question, QuestionId, QuestionType};

    fn q(id: &str, kind: QuestionType) -> Question {
        Question::with_id(id, kind)
    }

    fn store_of(items: &[(&str, QuestionType)]) -> QuestionStore {
        QuestionStore::from_questions(items.iter().map(|(id, kind)| q(id, kind.clone())))
            .expect("unique ids")
    }

    #[test]
    fn welcome_is_skipped_by_numbering() {
        let store = store_of(&[
            ("welcome", QuestionType::Welcome),
            ("a", QuestionType::Radio),
            ("b", QuestionType::Rating),
        ]);
        assert_eq!(store.number_of(&"welcome".into()), None);
        assert_eq!(store.number_of(&"a".into()), Some(1));
        assert_eq!(store.number_of(&"b".into()), Some(2));
    }

    #[test]
    fn numbering_follows_moves_and_deletes() {
        let mut store = store_of(&[
            ("a", QuestionType::Text),
            ("welcome", QuestionType::Welcome),
            ("b", QuestionType::Number),
            ("c", QuestionType::Grid),
        ]);
        store.move_question(&"c".into(), 0).expect("move");
        assert_eq!(store.number_of(&"c".into()), Some(1));
        assert_eq!(store.number_of(&"a".into()), Some(2));
        store.delete_question(&"a".into()).expect("delete");
        assert_eq!(store.number_of(&"b".into()), Some(2));
        let numbers: Vec<_> = store.numbering().map(|(_, n)| n).collect();
        assert_eq!(numbers, vec![Some(1), None, Some(2)]);
    }

    #[test]
    fn add_selects_new_question() {
        let mut store = store_of(&[("a", QuestionType::Text)]);
        store.add_question(q("b", QuestionType::Timer)).expect("add");
        assert_eq!(store.selected_id(), Some(&QuestionId::from("b")));
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut store = store_of(&[("a", QuestionType::Text)]);
        let err = store.add_question(q("a", QuestionType::Text)).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("a".into()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_replaces_only_matching_entry() {
        let mut store = store_of(&[("a", QuestionType::Text), ("b", QuestionType::Text)]);
        let mut edited = store.get(&"a".into()).cloned().expect("a");
        edited.set_question_text("Hello");
        store.update_question(edited).expect("update");
        assert_eq!(store.get(&"a".into()).map(Question::question_text), Some("Hello"));
        assert_eq!(store.get(&"b".into()).map(Question::question_text), Some(""));
    }

    #[test]
    fn update_is_idempotent() {
        let mut store = store_of(&[("a", QuestionType::Text)]);
        let mut edited = store.get(&"a".into()).cloned().expect("a");
        edited.set_description("d");
        store.update_question(edited.clone()).expect("first");
        let revision = store.revision();
        store.update_question(edited.clone()).expect("second");
        assert_eq!(store.revision(), revision);
        assert_eq!(store.get(&"a".into()), Some(&edited));
    }

    #[test]
    fn selection_sees_updates() {
        let mut store = store_of(&[("a", QuestionType::Text)]);
        let mut edited = store.selected().cloned().expect("selected");
        edited.set_question_text("live");
        store.update_question(edited).expect("update");
        assert_eq!(store.selected().map(Question::question_text), Some("live"));
    }

    #[test]
    fn update_unknown_id_is_reported() {
        let mut store = store_of(&[("a", QuestionType::Text)]);
        let err = store.update_question(q("ghost", QuestionType::Text)).unwrap_err();
        assert_eq!(err, StoreError::UnknownQuestion("ghost".into()));
    }

    #[test]
    fn update_cannot_change_type() {
        let mut store = store_of(&[("a", QuestionType::Text)]);
        let err = store.update_question(q("a", QuestionType::Radio)).unwrap_err();
        assert!(matches!(err, StoreError::TypeChanged { .. }));
        assert_eq!(store.get(&"a".into()).map(Question::kind), Some(&QuestionType::Text));
    }

    #[test]
    fn deleting_selected_falls_back_to_first() {
        let mut store = store_of(&[("a", QuestionType::Text), ("b", QuestionType::Text)]);
        store.set_selected(&"a".into()).expect("select");
        store.delete_question(&"a".into()).expect("delete");
        assert_eq!(store.selected_id(), Some(&QuestionId::from("b")));

        store.delete_question(&"b".into()).expect("delete");
        assert!(store.selected().is_none());
    }

    #[test]
    fn deleting_unselected_keeps_selection() {
        let mut store = store_of(&[("a", QuestionType::Text), ("b", QuestionType::Text)]);
        store.set_selected(&"b".into()).expect("select");
        store.delete_question(&"a".into()).expect("delete");
        assert_eq!(store.selected_id(), Some(&QuestionId::from("b")));
    }

    #[test]
    fn delete_unknown_id_is_reported() {
        let mut store = store_of(&[("a", QuestionType::Text)]);
        assert!(store.delete_question(&"zzz".into()).is_err());
        assert_eq!(store.len(), 1);
    }
}
