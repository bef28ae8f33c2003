use case_core::Clock;
use case_core::model::{
    Case, CaseId, Catalog, Category, CategoryProgress, ChoiceId, ProgressRecord, ProgressTable,
    QuestionId, Score, SectionId,
};
use storage::ProgressStore;

use crate::accordion::AccordionController;
use crate::answers::AnswerSheet;
use crate::error::SessionError;
use crate::navigation::NavigationController;
use crate::session_view::{SessionView, TimerView};
use crate::timer::ExamTimer;

//
// ─── SESSION ENGINE ────────────────────────────────────────────────────────────
//

/// Composes navigation, accordion, answer sheet, exam timer and the progress
/// store into one stateful session over an immutable catalog.
///
/// Every public operation applies one transition and returns the updated
/// [`SessionView`] for the caller to render. Operations never fail: degraded
/// environments (corrupt or unwritable storage) and disallowed actions
/// (reveal during an exam, navigation to an unknown case) all resolve to
/// defined no-op or fallback behavior.
pub struct SessionEngine {
    catalog: Catalog,
    clock: Clock,
    store: ProgressStore,

    nav: NavigationController,
    accordion: AccordionController,
    answers: AnswerSheet,
    timer: ExamTimer,

    /// Last `(case, score)` pair written through the store, to gate the
    /// read-merge-write on actual score changes.
    last_persisted: Option<(CaseId, Score)>,
}

impl std::fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine").finish_non_exhaustive()
    }
}

impl SessionEngine {
    /// Build a session over the given case list.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the list is empty or contains
    /// duplicate case ids.
    pub fn new(cases: Vec<Case>, store: ProgressStore, clock: Clock) -> Result<Self, SessionError> {
        Ok(Self::from_catalog(Catalog::new(cases)?, store, clock))
    }

    /// Build a session over an already validated catalog.
    #[must_use]
    pub fn from_catalog(catalog: Catalog, store: ProgressStore, clock: Clock) -> Self {
        let nav = NavigationController::new(&catalog);
        Self {
            catalog,
            clock,
            store,
            nav,
            accordion: AccordionController::new(),
            answers: AnswerSheet::new(),
            timer: ExamTimer::new(),
            last_persisted: None,
        }
    }

    // ─── Navigation ────────────────────────────────────────────────────────

    /// Switch the active category; reassigns the active case when it falls
    /// outside the new category.
    pub fn select_category(&mut self, category: Category) -> SessionView {
        if self.nav.select_category(&self.catalog, category) {
            self.on_case_changed();
        }
        self.view()
    }

    /// Select a case from the active category's list. Unknown ids and cases
    /// of other categories are ignored.
    pub fn select_case(&mut self, case_id: &CaseId) -> SessionView {
        if self.nav.select_case(&self.catalog, case_id) {
            self.on_case_changed();
        }
        self.view()
    }

    /// Toggle a section of the active case open or closed.
    pub fn toggle_section(&mut self, section_id: &SectionId) -> SessionView {
        self.accordion.toggle(section_id);
        self.view()
    }

    // ─── Answering ─────────────────────────────────────────────────────────

    /// Record the user's choice for a question and persist the new score.
    pub fn select_choice(&mut self, question_id: QuestionId, choice_id: ChoiceId) -> SessionView {
        self.answers.select(question_id, choice_id);
        self.persist_score_if_changed();
        self.view()
    }

    /// Toggle an explanation. No-op while exam mode is on.
    pub fn toggle_reveal(&mut self, question_id: &QuestionId) -> SessionView {
        let allowed = self.timer.reveal_allowed();
        self.answers.toggle_reveal(question_id, allowed);
        self.view()
    }

    // ─── Exam mode / timer ─────────────────────────────────────────────────

    /// Turn exam mode on or off. Enabling rearms the countdown at the default
    /// duration and hides the active case's explanations.
    pub fn set_exam_mode(&mut self, enabled: bool) -> SessionView {
        if enabled {
            self.timer.enable();
            self.hide_active_case_answers();
        } else {
            self.timer.disable();
        }
        self.view()
    }

    pub fn start_timer(&mut self) -> SessionView {
        self.timer.start();
        self.view()
    }

    pub fn pause_timer(&mut self) -> SessionView {
        self.timer.pause();
        self.view()
    }

    /// Rearm the countdown with a fresh duration. Like enabling exam mode,
    /// this hides the active case's explanations. No-op when exam mode is off.
    pub fn reset_timer(&mut self, duration_seconds: u32) -> SessionView {
        if self.timer.exam_mode() {
            self.timer.reset(duration_seconds);
            self.hide_active_case_answers();
        }
        self.view()
    }

    /// One second of elapsed time. Only moves the countdown while `Running`,
    /// so a tick delivered around a pause cannot touch a frozen timer.
    pub fn tick(&mut self) -> SessionView {
        self.timer.tick();
        self.view()
    }

    // ─── Queries ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The case currently displayed. Always resolves: an id that no longer
    /// exists in the catalog falls back to the catalog's first case.
    #[must_use]
    pub fn active_case(&self) -> &Case {
        Self::resolve_case(&self.catalog, self.nav.active_case())
    }

    #[must_use]
    pub fn active_category(&self) -> Category {
        self.nav.active_category()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.answers.score(self.active_case())
    }

    /// Persisted record for the active case, if the user has ever answered
    /// one of its questions.
    #[must_use]
    pub fn saved_progress(&self) -> Option<ProgressRecord> {
        self.store.load().record(self.active_case().id()).copied()
    }

    /// Clamped aggregate over all cases of the active category.
    #[must_use]
    pub fn category_progress(&self) -> CategoryProgress {
        let table = self.store.load();
        Self::aggregate_category(&self.catalog, self.nav.active_category(), &table)
    }

    #[must_use]
    pub fn selected_choice(&self, question_id: &QuestionId) -> Option<&ChoiceId> {
        self.answers.selected(question_id)
    }

    #[must_use]
    pub fn is_revealed(&self, question_id: &QuestionId) -> bool {
        self.answers.is_revealed(question_id)
    }

    /// Full observable state, as returned by every operation.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let table = self.store.load();
        let case = self.active_case();
        SessionView {
            active_category: self.nav.active_category(),
            active_case: case.id().clone(),
            open_section: self.accordion.open_section().cloned(),
            score: self.answers.score(case),
            saved: table.record(case.id()).copied(),
            category_progress: Self::aggregate_category(
                &self.catalog,
                self.nav.active_category(),
                &table,
            ),
            timer: TimerView::from_timer(&self.timer),
            revealed: self.answers.revealed_in(case),
        }
    }

    // ─── Wiring ────────────────────────────────────────────────────────────

    fn resolve_case<'a>(catalog: &'a Catalog, id: &CaseId) -> &'a Case {
        catalog.case(id).unwrap_or_else(|| catalog.first_case())
    }

    fn aggregate_category(
        catalog: &Catalog,
        category: Category,
        table: &ProgressTable,
    ) -> CategoryProgress {
        CategoryProgress::aggregate(catalog.cases_in(category), table)
    }

    /// Case-change transition: the new case starts with all explanations
    /// hidden and the accordion closed. Selections and the exam timer are
    /// left untouched.
    fn on_case_changed(&mut self) {
        self.accordion.close_all();
        self.hide_active_case_answers();
        self.persist_score_if_changed();
    }

    fn hide_active_case_answers(&mut self) {
        let case = Self::resolve_case(&self.catalog, self.nav.active_case());
        self.answers.hide_answers_for(case);
    }

    /// Read-merge-write the active case's record whenever its computed score
    /// differs from the last persisted one.
    ///
    /// A record exists only once the user has answered something in the
    /// case: navigation alone never creates one. Within a case `answered`
    /// cannot drop back to zero (selections only overwrite), so the gate
    /// never suppresses a real update.
    fn persist_score_if_changed(&mut self) {
        let case = Self::resolve_case(&self.catalog, self.nav.active_case());
        let case_id = case.id().clone();
        let score = self.answers.score(case);
        if score.total == 0 || score.answered == 0 {
            return;
        }
        if self
            .last_persisted
            .as_ref()
            .is_some_and(|(id, s)| id == &case_id && s == &score)
        {
            return;
        }

        self.store.record_case(
            &case_id,
            ProgressRecord::new(score.answered, score.correct, self.clock.now_millis()),
        );
        self.last_persisted = Some((case_id, score));
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
