#![forbid(unsafe_code)]

pub mod accordion;
pub mod answers;
pub mod error;
pub mod navigation;
pub mod session;
pub mod session_view;
pub mod ticker;
pub mod timer;

pub use case_core::Clock;

pub use accordion::AccordionController;
pub use answers::AnswerSheet;
pub use error::SessionError;
pub use navigation::NavigationController;
pub use session::SessionEngine;
pub use session_view::{SessionView, TimerView, format_remaining};
pub use ticker::Ticker;
pub use timer::{DEFAULT_EXAM_SECONDS, ExamTimer, TimerPhase};
