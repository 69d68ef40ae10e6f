#![forbid(unsafe_code)]

pub mod admin;
pub mod app_services;
pub mod error;
pub mod leaderboard;
pub mod question_source;
pub mod sessions;
pub mod stats_service;

pub use quiz_core::Clock;

pub use admin::{QuestionTab, UploadService, UploadSummary};
pub use app_services::AppServices;
pub use error::{
    AppServicesError, QuestionSourceError, SessionError, StatsError, UploadError,
};
pub use leaderboard::{LEADERBOARD_SIZE, LeaderboardService, LeaderboardSubscription};
pub use question_source::{
    HttpQuestionSource, HttpSourceConfig, QuestionSource, StoredQuestionSource,
};
pub use stats_service::StatsService;

pub use sessions::{
    ANONYMOUS_QUESTION_LIMIT, FinalizedSession, QuizLoopService, QuizOutcome, QuizSession,
    SampleSize, SessionKind, SessionProgress, StatsRecord,
};
