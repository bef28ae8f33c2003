use std::collections::HashSet;

use case_core::model::{Case, ChoiceId, QuestionId, Score, SelectionMap};

/// The user's selections and which explanations are currently shown.
///
/// Both maps are keyed by case-scoped question ids, so entries only carry
/// meaning relative to the case being displayed. Selections survive case
/// switches; reveal flags for a case are wiped whenever it becomes active.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    selected: SelectionMap,
    revealed: HashSet<QuestionId>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the selection for a question. Correctness is
    /// derived at scoring time, never stored here.
    pub fn select(&mut self, question_id: QuestionId, choice_id: ChoiceId) {
        self.selected.insert(question_id, choice_id);
    }

    #[must_use]
    pub fn selected(&self, question_id: &QuestionId) -> Option<&ChoiceId> {
        self.selected.get(question_id)
    }

    #[must_use]
    pub fn is_revealed(&self, question_id: &QuestionId) -> bool {
        self.revealed.contains(question_id)
    }

    /// Flip the reveal flag for a question. When `allowed` is false (exam
    /// mode active) this is a no-op, surfaced to the caller by the unchanged
    /// return value rather than an error.
    pub fn toggle_reveal(&mut self, question_id: &QuestionId, allowed: bool) -> bool {
        if !allowed {
            return self.is_revealed(question_id);
        }
        if !self.revealed.remove(question_id) {
            self.revealed.insert(question_id.clone());
        }
        self.is_revealed(question_id)
    }

    /// Hide explanations for every question of the given case, leaving
    /// selections and other cases' reveal flags alone.
    pub fn hide_answers_for(&mut self, case: &Case) {
        for question in case.questions() {
            self.revealed.remove(question.id());
        }
    }

    /// Reveal flags currently set among the given case's questions.
    #[must_use]
    pub fn revealed_in(&self, case: &Case) -> HashSet<QuestionId> {
        case.questions()
            .map(|q| q.id())
            .filter(|id| self.revealed.contains(*id))
            .cloned()
            .collect()
    }

    /// Current score for a case, recomputed from scratch.
    #[must_use]
    pub fn score(&self, case: &Case) -> Score {
        Score::compute(case, &self.selected)
    }
}
