use std::collections::HashMap;

use crate::model::{Case, ChoiceId, QuestionId};

/// Current choice per question. Absent key means "not answered".
pub type SelectionMap = HashMap<QuestionId, ChoiceId>;

/// Derived per-case tally. Never stored; recomputed from selections on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub answered: u32,
    pub correct: u32,
    pub total: u32,
}

impl Score {
    /// Compute the score for a case against the current selections.
    ///
    /// Pure over its inputs: no counters are kept between calls, so the
    /// result cannot drift from the selection map.
    #[must_use]
    pub fn compute(case: &Case, selections: &SelectionMap) -> Self {
        let mut answered = 0_u32;
        let mut correct = 0_u32;
        let mut total = 0_u32;

        for question in case.questions() {
            total += 1;
            if let Some(pick) = selections.get(question.id()) {
                answered += 1;
                if pick == question.answer_id() {
                    correct += 1;
                }
            }
        }

        Self {
            answered,
            correct,
            total,
        }
    }
}
