use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::session::SessionEngine;

/// Drives the engine's one autonomous event: the periodic timer tick.
///
/// The background thread delivers `tick()` once per period until the handle
/// is stopped or dropped. Teardown joins the thread, so no tick can fire
/// after it returns; ticks delivered while the timer is paused are no-ops
/// inside the state machine.
pub struct Ticker {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a ticker over a shared engine.
    #[must_use]
    pub fn spawn(engine: Arc<Mutex<SessionEngine>>, period: Duration) -> Self {
        let (shutdown, signal) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            loop {
                match signal.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        let Ok(mut engine) = engine.lock() else {
                            break;
                        };
                        engine.tick();
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        }
    }

    /// Spawn with the one-second cadence the countdown is defined in.
    #[must_use]
    pub fn spawn_per_second(engine: Arc<Mutex<SessionEngine>>) -> Self {
        Self::spawn(engine, Duration::from_secs(1))
    }

    /// Stop the ticker and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shut_down();
    }

    fn shut_down(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shut_down();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_core::model::{Case, Category, Choice, Question, Section};
    use case_core::time::fixed_clock;
    use storage::ProgressStore;

    fn shared_engine() -> Arc<Mutex<SessionEngine>> {
        let question = Question::new(
            "q1",
            "stem",
            vec![Choice::new("a", "A"), Choice::new("b", "B")],
            "a",
            "why",
        )
        .unwrap();
        let case = Case::new(
            "c1",
            Category::Hbt,
            "T",
            "S",
            "P",
            vec![Section::new("s1", "Sec", vec![], vec![question])],
        );
        let engine =
            SessionEngine::new(vec![case], ProgressStore::in_memory(), fixed_clock()).unwrap();
        Arc::new(Mutex::new(engine))
    }

    #[test]
    fn ticks_while_running_and_never_after_stop() {
        let engine = shared_engine();
        {
            let mut guard = engine.lock().unwrap();
            guard.set_exam_mode(true);
            guard.start_timer();
        }

        let ticker = Ticker::spawn(Arc::clone(&engine), Duration::from_millis(5));
        thread::sleep(Duration::from_millis(100));
        ticker.stop();

        let frozen = engine.lock().unwrap().view().timer.remaining_seconds;
        assert!(frozen < crate::timer::DEFAULT_EXAM_SECONDS);

        // Stopped means joined: nothing can move the timer anymore.
        thread::sleep(Duration::from_millis(30));
        let after = engine.lock().unwrap().view().timer.remaining_seconds;
        assert_eq!(after, frozen);
    }

    #[test]
    fn paused_timer_is_not_moved_by_a_live_ticker() {
        let engine = shared_engine();
        engine.lock().unwrap().set_exam_mode(true);

        let _ticker = Ticker::spawn(Arc::clone(&engine), Duration::from_millis(5));
        thread::sleep(Duration::from_millis(50));

        let view = engine.lock().unwrap().view();
        assert_eq!(view.timer.remaining_seconds, crate::timer::DEFAULT_EXAM_SECONDS);
    }
}
