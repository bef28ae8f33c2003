/// Default exam duration: 15 minutes.
pub const DEFAULT_EXAM_SECONDS: u32 = 15 * 60;

/// Observable phase of the countdown state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Exam mode off; reveal is permitted.
    Idle,
    /// Exam mode on, countdown not running, time remaining.
    Armed,
    Running,
    /// Countdown reached zero.
    Expired,
}

/// Pausable countdown that gates answer reveal while exam mode is on.
///
/// Session-scoped, never persisted, and independent of navigation: switching
/// cases mid-exam does not touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamTimer {
    exam_mode: bool,
    remaining: u32,
    running: bool,
}

impl Default for ExamTimer {
    fn default() -> Self {
        Self {
            exam_mode: false,
            remaining: DEFAULT_EXAM_SECONDS,
            running: false,
        }
    }
}

impl ExamTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn exam_mode(&self) -> bool {
        self.exam_mode
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        if !self.exam_mode {
            TimerPhase::Idle
        } else if self.remaining == 0 {
            TimerPhase::Expired
        } else if self.running {
            TimerPhase::Running
        } else {
            TimerPhase::Armed
        }
    }

    /// Reveal is permitted exactly while exam mode is off, regardless of
    /// whether the countdown is running or paused.
    #[must_use]
    pub fn reveal_allowed(&self) -> bool {
        !self.exam_mode
    }

    /// Turn exam mode on, rearming the countdown at the default duration.
    pub fn enable(&mut self) {
        self.exam_mode = true;
        self.reset(DEFAULT_EXAM_SECONDS);
    }

    /// Turn exam mode off and stop the countdown. Remaining seconds are kept
    /// for display; reveal flags hidden during the exam stay hidden.
    pub fn disable(&mut self) {
        self.exam_mode = false;
        self.running = false;
    }

    /// `Armed -> Running`. No-op when exam mode is off or time has expired.
    pub fn start(&mut self) {
        if self.phase() == TimerPhase::Armed {
            self.running = true;
        }
    }

    /// `Running -> Armed`.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// One second of elapsed time while `Running`; freezes at zero.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
        }
    }

    /// Rearm with a fresh duration. No-op unless exam mode is on.
    pub fn reset(&mut self, duration_seconds: u32) {
        if !self.exam_mode {
            return;
        }
        self.running = false;
        self.remaining = duration_seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_enabled() {
        let timer = ExamTimer::new();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert!(timer.reveal_allowed());
    }

    #[test]
    fn enable_arms_at_default_regardless_of_prior_state() {
        let mut timer = ExamTimer::new();
        timer.enable();
        timer.start();
        timer.tick();
        timer.disable();

        timer.enable();
        assert_eq!(timer.phase(), TimerPhase::Armed);
        assert_eq!(timer.remaining_seconds(), DEFAULT_EXAM_SECONDS);
        assert!(!timer.is_running());
    }

    #[test]
    fn start_is_gated_by_phase() {
        let mut timer = ExamTimer::new();
        timer.start();
        assert_eq!(timer.phase(), TimerPhase::Idle);

        timer.enable();
        timer.start();
        assert_eq!(timer.phase(), TimerPhase::Running);

        timer.pause();
        assert_eq!(timer.phase(), TimerPhase::Armed);
    }

    #[test]
    fn reveal_blocked_in_every_exam_phase() {
        let mut timer = ExamTimer::new();
        timer.enable();
        assert!(!timer.reveal_allowed()); // Armed

        timer.start();
        assert!(!timer.reveal_allowed()); // Running

        timer.reset(1);
        timer.start();
        timer.tick();
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert!(!timer.reveal_allowed());

        timer.disable();
        assert!(timer.reveal_allowed());
    }

    #[test]
    fn counts_down_to_expiry_and_freezes_at_zero() {
        let mut timer = ExamTimer::new();
        timer.enable();
        timer.reset(900);
        timer.start();

        for _ in 0..900 {
            timer.tick();
        }
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());

        // The 901st tick must not underflow.
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn expired_timer_does_not_restart() {
        let mut timer = ExamTimer::new();
        timer.enable();
        timer.reset(1);
        timer.start();
        timer.tick();

        timer.start();
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert!(!timer.is_running());
    }

    #[test]
    fn tick_while_paused_changes_nothing() {
        let mut timer = ExamTimer::new();
        timer.enable();
        timer.start();
        timer.tick();
        let frozen = timer.remaining_seconds();

        timer.pause();
        timer.tick();
        timer.tick();
        assert_eq!(timer.remaining_seconds(), frozen);
    }

    #[test]
    fn reset_requires_exam_mode() {
        let mut timer = ExamTimer::new();
        timer.reset(60);
        assert_eq!(timer.remaining_seconds(), DEFAULT_EXAM_SECONDS);

        timer.enable();
        timer.reset(60);
        assert_eq!(timer.remaining_seconds(), 60);
        assert_eq!(timer.phase(), TimerPhase::Armed);
    }
}
