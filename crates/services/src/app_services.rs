use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::admin::UploadService;
use crate::error::AppServicesError;
use crate::leaderboard::LeaderboardService;
use crate::question_source::{
    HttpQuestionSource, HttpSourceConfig, QuestionSource, StoredQuestionSource,
};
use crate::sessions::QuizLoopService;
use crate::stats_service::StatsService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
    leaderboard: Arc<LeaderboardService>,
    uploads: Arc<UploadService>,
    remote_questions: bool,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// Questions come from `http` when configured, otherwise from the local
    /// bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        http: Option<HttpSourceConfig>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, http))
    }

    /// Build services over in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, None)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, http: Option<HttpSourceConfig>) -> Self {
        let remote_questions = http.is_some();
        let source: Arc<dyn QuestionSource> = match http {
            Some(config) => {
                tracing::info!(base_url = %config.base_url, "loading questions over HTTP");
                Arc::new(HttpQuestionSource::new(config))
            }
            None => Arc::new(StoredQuestionSource::new(Arc::clone(&storage.questions))),
        };

        let stats = StatsService::new(Arc::clone(&storage.stats));
        let leaderboard = LeaderboardService::new(Arc::clone(&storage.stats), &stats);
        let quiz_loop = QuizLoopService::new(clock, source, stats.clone());
        let uploads = UploadService::new(clock, Arc::clone(&storage.questions));

        Self {
            quiz_loop: Arc::new(quiz_loop),
            stats: Arc::new(stats),
            leaderboard: Arc::new(leaderboard),
            uploads: Arc::new(uploads),
            remote_questions,
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn uploads(&self) -> Arc<UploadService> {
        Arc::clone(&self.uploads)
    }

    /// True when quiz questions are fetched over HTTP rather than read from
    /// the local bank.
    #[must_use]
    pub fn remote_questions(&self) -> bool {
        self.remote_questions
    }
}
