//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::ScoreError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted while loading a question set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("question set is malformed: {0}")]
    Malformed(#[from] UploadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("option {index} does not exist on a question with {len} options")]
    InvalidOption { index: usize, len: usize },
    #[error(transparent)]
    Source(#[from] QuestionSourceError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Errors emitted by `StatsService` and `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while importing question records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UploadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record {index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },
    #[error("nothing to upload")]
    Empty,
    #[error("image compression did not finish: {0}")]
    Compression(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
