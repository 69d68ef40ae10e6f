use std::sync::Arc;

use quiz_core::model::{Identity, Question, Subject, UserStats};
use quiz_core::{ScoreReport, score};

use super::plan::{SampleSize, SessionBuilder};
use super::service::{FinalizedSession, QuizSession, SessionKind};
use crate::Clock;
use crate::error::SessionError;
use crate::question_source::QuestionSource;
use crate::stats_service::StatsService;

/// What happened to the player's running totals after a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsRecord {
    /// Nobody was signed in; nothing was saved.
    Anonymous,
    Saved(UserStats),
    /// The save failed; the report is still valid.
    Failed(String),
}

/// Result of completing a session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub session: FinalizedSession,
    pub report: ScoreReport,
    pub stats: StatsRecord,
}

/// Orchestrates session start and completion.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    stats: StatsService,
    shuffle: bool,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>, stats: StatsService) -> Self {
        Self {
            clock,
            source,
            stats,
            shuffle: true,
        }
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Load a category and sample a fresh session from it.
    ///
    /// Anonymous callers (`identity == None`) get at most
    /// `ANONYMOUS_QUESTION_LIMIT` questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Source` if the category cannot be loaded and
    /// `SessionError::Empty` if it holds no questions.
    pub async fn start_session(
        &self,
        subject: &Subject,
        size: SampleSize,
        identity: Option<&Identity>,
    ) -> Result<QuizSession, SessionError> {
        let available = self.source.questions_for(subject).await?;
        let questions = SessionBuilder::new(size)
            .anonymous(identity.is_none())
            .with_shuffle(self.shuffle)
            .build(available);

        tracing::info!(
            subject = %subject,
            count = questions.len(),
            signed_in = identity.is_some(),
            "starting quiz session"
        );
        QuizSession::load(
            questions,
            subject.clone(),
            SessionKind::Fresh,
            self.clock.now(),
        )
    }

    /// Start a session over an earlier attempt's incorrect questions, in their
    /// original order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `incorrect` is empty.
    pub fn start_retry(
        &self,
        incorrect: Vec<Question>,
        subject: Subject,
    ) -> Result<QuizSession, SessionError> {
        tracing::info!(subject = %subject, count = incorrect.len(), "starting retry session");
        QuizSession::load(incorrect, subject, SessionKind::Retry, self.clock.now())
    }

    /// Submit a session: score it and, for a signed-in player, record the
    /// totals exactly once.
    ///
    /// A failed stats write is reported in `QuizOutcome::stats` and never
    /// prevents the report from being returned.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Score` only if the session cannot be scored.
    pub async fn complete(
        &self,
        session: QuizSession,
        identity: Option<&Identity>,
    ) -> Result<QuizOutcome, SessionError> {
        let finalized = session.finalize();
        let report = score(&finalized.questions, &finalized.answers)?;

        let stats = match identity {
            None => StatsRecord::Anonymous,
            Some(identity) => match self.stats.record_session(identity, &report).await {
                Ok(saved) => StatsRecord::Saved(saved),
                Err(e) => {
                    tracing::warn!(error = %e, user = %identity.user_id(), "failed to save stats");
                    StatsRecord::Failed(e.to_string())
                }
            },
        };

        tracing::info!(
            subject = %finalized.subject,
            correct = report.correct_count(),
            total = report.total(),
            percentage = report.percentage(),
            "completed quiz session"
        );

        Ok(QuizOutcome {
            session: finalized,
            report,
            stats,
        })
    }
}
