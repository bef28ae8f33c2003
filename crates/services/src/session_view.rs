use std::collections::HashSet;

use case_core::model::{
    CaseId, Category, CategoryProgress, ProgressRecord, QuestionId, Score, SectionId,
};

use crate::timer::{ExamTimer, TimerPhase};

/// Timer snapshot for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    pub remaining_seconds: u32,
    pub running: bool,
    pub exam_mode: bool,
    pub phase: TimerPhase,
    /// False while exam mode is on; callers render a disabled reveal control.
    pub reveal_allowed: bool,
}

impl TimerView {
    #[must_use]
    pub fn from_timer(timer: &ExamTimer) -> Self {
        Self {
            remaining_seconds: timer.remaining_seconds(),
            running: timer.is_running(),
            exam_mode: timer.exam_mode(),
            phase: timer.phase(),
            reveal_allowed: timer.reveal_allowed(),
        }
    }
}

/// Presentation-agnostic snapshot of the whole session, returned by every
/// engine operation so the caller can re-render.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings
/// beyond what the engine owns, no layout assumptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub active_category: Category,
    pub active_case: CaseId,
    pub open_section: Option<SectionId>,

    /// Live score for the active case.
    pub score: Score,
    /// Last persisted record for the active case, if any.
    pub saved: Option<ProgressRecord>,
    /// Clamped aggregate over the active category.
    pub category_progress: CategoryProgress,

    pub timer: TimerView,
    /// Questions of the active case whose explanations are shown.
    pub revealed: HashSet<QuestionId>,
}

/// Countdown display in the `m:ss` format the timer has always used.
#[must_use]
pub fn format_remaining(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
