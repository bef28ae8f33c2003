use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::model::{CaseId, ChoiceId, QuestionId, SectionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog contains no cases")]
    Empty,

    #[error("duplicate case id: {0}")]
    DuplicateCase(CaseId),

    #[error("question {question} designates answer {answer} which is not among its choices")]
    AnswerKeyMismatch {
        question: QuestionId,
        answer: ChoiceId,
    },

    #[error("question {0} has no choices")]
    NoChoices(QuestionId),
}

/// Category tag for a case, from a fixed clinical taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Hbt,
    Trauma,
    Breast,
    Endo,
    Git,
    Vasc,
    Pedia,
}

impl Category {
    /// Human-readable label for sidebars and summaries.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Category::Hbt => "HBT",
            Category::Trauma => "Trauma",
            Category::Breast => "Breast",
            Category::Endo => "Endocrine",
            Category::Git => "GIT",
            Category::Vasc => "Vascular",
            Category::Pedia => "Pedia",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
}

impl Choice {
    #[must_use]
    pub fn new(id: impl Into<ChoiceId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A multiple-choice question with exactly one correct choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    choices: Vec<Choice>,
    answer_id: ChoiceId,
    explanation: String,
}

impl Question {
    /// Build a question, checking that the answer key points at a listed choice.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoChoices` if the choice list is empty and
    /// `CatalogError::AnswerKeyMismatch` if `answer_id` matches no choice.
    pub fn new(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        choices: Vec<Choice>,
        answer_id: impl Into<ChoiceId>,
        explanation: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let id = id.into();
        let answer_id = answer_id.into();

        if choices.is_empty() {
            return Err(CatalogError::NoChoices(id));
        }
        if !choices.iter().any(|c| c.id == answer_id) {
            return Err(CatalogError::AnswerKeyMismatch {
                question: id,
                answer: answer_id,
            });
        }

        Ok(Self {
            id,
            text: text.into(),
            choices,
            answer_id,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Identifier of the designated correct choice.
    #[must_use]
    pub fn answer_id(&self) -> &ChoiceId {
        &self.answer_id
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// A named, individually expandable subdivision of a case.
///
/// Narrative lines are opaque text; any heading/bullet styling heuristics
/// belong to the presentation layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub content: Vec<String>,
    pub questions: Vec<Question>,
}

impl Section {
    #[must_use]
    pub fn new(
        id: impl Into<SectionId>,
        title: impl Into<String>,
        content: Vec<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
            questions,
        }
    }
}

/// A top-level study unit: one clinical scenario with sections and questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    id: CaseId,
    category: Category,
    title: String,
    subtitle: String,
    priority_line: String,
    sections: Vec<Section>,
}

impl Case {
    #[must_use]
    pub fn new(
        id: impl Into<CaseId>,
        category: Category,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        priority_line: impl Into<String>,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
            subtitle: subtitle.into(),
            priority_line: priority_line.into(),
            sections,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CaseId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// The one-line management priority shown above the sections.
    #[must_use]
    pub fn priority_line(&self) -> &str {
        &self.priority_line
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// All questions of the case in section order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    #[must_use]
    pub fn question_total(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

/// Ordered, read-only collection of cases supplied at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    cases: Vec<Case>,
}

impl Catalog {
    /// Build a catalog from an ordered case list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list and
    /// `CatalogError::DuplicateCase` when two cases share an id.
    pub fn new(cases: Vec<Case>) -> Result<Self, CatalogError> {
        if cases.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for case in &cases {
            if !seen.insert(case.id().clone()) {
                return Err(CatalogError::DuplicateCase(case.id().clone()));
            }
        }
        Ok(Self { cases })
    }

    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    #[must_use]
    pub fn case(&self, id: &CaseId) -> Option<&Case> {
        self.cases.iter().find(|c| c.id() == id)
    }

    /// Cases tagged with the given category, in catalog order.
    pub fn cases_in(&self, category: Category) -> impl Iterator<Item = &Case> {
        self.cases.iter().filter(move |c| c.category() == category)
    }

    /// The catalog-wide fallback case.
    #[must_use]
    pub fn first_case(&self) -> &Case {
        // Non-empty by construction.
        &self.cases[0]
    }

    #[must_use]
    pub fn first_case_in(&self, category: Category) -> Option<&Case> {
        self.cases_in(category).next()
    }

    /// Distinct categories in first-appearance order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = HashSet::new();
        self.cases
            .iter()
            .map(Case::category)
            .filter(|c| seen.insert(*c))
            .collect()
    }
}
