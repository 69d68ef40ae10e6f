use std::sync::Arc;

use tokio::sync::watch;

use quiz_core::ScoreReport;
use quiz_core::model::{Identity, UserId, UserStats};
use storage::repository::UserStatsRepository;

use crate::error::StatsError;

/// Merges finished sessions into per-user running totals.
///
/// Every successful write bumps a revision counter that leaderboard
/// subscribers watch.
#[derive(Clone)]
pub struct StatsService {
    stats: Arc<dyn UserStatsRepository>,
    revision: Arc<watch::Sender<u64>>,
}

impl StatsService {
    #[must_use]
    pub fn new(stats: Arc<dyn UserStatsRepository>) -> Self {
        let (revision, _rx) = watch::channel(0);
        Self {
            stats,
            revision: Arc::new(revision),
        }
    }

    /// Add one scored session to the identity's totals.
    ///
    /// Creates the record from the session's counts when none exists yet. No
    /// deduplication happens here; callers record each session once.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the write fails.
    pub async fn record_session(
        &self,
        identity: &Identity,
        report: &ScoreReport,
    ) -> Result<UserStats, StatsError> {
        let counts = report.session_counts();
        let stats = self
            .stats
            .add_session(identity.user_id(), identity.email(), counts)
            .await?;
        tracing::info!(
            user = %identity.user_id(),
            solved = counts.solved,
            correct = counts.correct,
            total_correct = stats.total_correct(),
            "recorded session stats"
        );
        self.publish();
        Ok(stats)
    }

    /// Sign-up initialisation: a zeroed record unless one already exists.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the write fails.
    pub async fn register(&self, identity: &Identity) -> Result<UserStats, StatsError> {
        let stats = self
            .stats
            .ensure_stats(identity.user_id(), identity.email())
            .await?;
        self.publish();
        Ok(stats)
    }

    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the read fails.
    pub async fn get(&self, user_id: &UserId) -> Result<Option<UserStats>, StatsError> {
        Ok(self.stats.get_stats(user_id).await?)
    }

    /// Receiver that changes after each successful write.
    #[must_use]
    pub fn revisions(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn publish(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}
