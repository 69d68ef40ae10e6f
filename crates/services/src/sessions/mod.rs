mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{ANONYMOUS_QUESTION_LIMIT, SampleSize, SessionBuilder};
pub use progress::SessionProgress;
pub use service::{FinalizedSession, QuizSession, SessionKind};
pub use workflow::{QuizLoopService, QuizOutcome, StatsRecord};
