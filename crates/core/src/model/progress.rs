use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Case, CaseId};

/// Persisted answered/correct tally for one case.
///
/// Overwritten wholesale on every score change; `updated_at` (Unix millis)
/// is advisory only since the store has a single writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub answered: u32,
    pub correct: u32,
    pub updated_at: i64,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(answered: u32, correct: u32, updated_at: i64) -> Self {
        Self {
            answered,
            correct,
            updated_at,
        }
    }
}

/// The full persisted table: one record per case the user has touched.
///
/// Serialized shape is `{ "cases": { caseId: { answered, correct, updatedAt } } }`,
/// matching the slot format already in the field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressTable {
    pub cases: BTreeMap<String, ProgressRecord>,
}

impl ProgressTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn record(&self, case_id: &CaseId) -> Option<&ProgressRecord> {
        self.cases.get(case_id.as_str())
    }

    /// Set (overwrite, not increment) the record for one case.
    pub fn set(&mut self, case_id: &CaseId, record: ProgressRecord) {
        self.cases.insert(case_id.as_str().to_owned(), record);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Clamped sum of progress records across the cases of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryProgress {
    pub total: u32,
    pub answered: u32,
    pub correct: u32,
}

impl CategoryProgress {
    /// Aggregate persisted records over `cases`.
    ///
    /// Each case's persisted counts are clamped to that case's own question
    /// total before summation, so a stale record from an earlier version of
    /// a case (with more questions than it has now) cannot inflate the sum.
    #[must_use]
    pub fn aggregate<'a>(
        cases: impl IntoIterator<Item = &'a Case>,
        table: &ProgressTable,
    ) -> Self {
        let mut agg = Self::default();
        for case in cases {
            let questions = u32::try_from(case.question_total()).unwrap_or(u32::MAX);
            agg.total += questions;
            if let Some(record) = table.record(case.id()) {
                agg.answered += record.answered.min(questions);
                agg.correct += record.correct.min(questions);
            }
        }
        agg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Choice, Question, QuestionId, Section};

    fn case_with_questions(id: &str, count: usize) -> Case {
        let questions = (0..count)
            .map(|i| {
                Question::new(
                    QuestionId::new(format!("{id}-q{i}")),
                    "stem",
                    vec![Choice::new("a", "A"), Choice::new("b", "B")],
                    "a",
                    "why",
                )
                .unwrap()
            })
            .collect();
        Case::new(
            id,
            Category::Hbt,
            "T",
            "S",
            "P",
            vec![Section::new("s1", "Sec", vec![], questions)],
        )
    }

    #[test]
    fn table_round_trips_with_camel_case_timestamp() {
        let mut table = ProgressTable::new();
        table.set(&CaseId::new("c1"), ProgressRecord::new(2, 1, 1_700_000_000_000));

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"cases":{"c1":{"answered":2,"correct":1,"updatedAt":1700000000000}}}"#
        );

        let back: ProgressTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn set_overwrites_existing_record() {
        let id = CaseId::new("c1");
        let mut table = ProgressTable::new();
        table.set(&id, ProgressRecord::new(1, 0, 10));
        table.set(&id, ProgressRecord::new(2, 1, 20));

        assert_eq!(table.record(&id), Some(&ProgressRecord::new(2, 1, 20)));
        assert_eq!(table.cases.len(), 1);
    }

    #[test]
    fn aggregate_clamps_stale_records_to_case_totals() {
        let case_a = case_with_questions("a", 3);
        let case_b = case_with_questions("b", 2);

        let mut table = ProgressTable::new();
        // Stale record: claims 5 correct for a case that now has 3 questions.
        table.set(case_a.id(), ProgressRecord::new(5, 5, 0));
        table.set(case_b.id(), ProgressRecord::new(1, 1, 0));

        let agg = CategoryProgress::aggregate([&case_a, &case_b], &table);
        assert_eq!(agg.total, 5);
        assert_eq!(agg.answered, 4);
        assert_eq!(agg.correct, 4);
    }

    #[test]
    fn aggregate_skips_cases_without_records() {
        let case_a = case_with_questions("a", 3);
        let case_b = case_with_questions("b", 2);

        let mut table = ProgressTable::new();
        table.set(case_b.id(), ProgressRecord::new(2, 1, 0));

        let agg = CategoryProgress::aggregate([&case_a, &case_b], &table);
        assert_eq!(agg.total, 5);
        assert_eq!(agg.answered, 2);
        assert_eq!(agg.correct, 1);
    }
}
