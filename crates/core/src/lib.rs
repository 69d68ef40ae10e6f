#![forbid(unsafe_code)]

pub mod model;
pub mod scoring;
pub mod time;

pub use scoring::{QuestionOutcome, ScoreError, ScoreReport, score};
pub use time::Clock;
