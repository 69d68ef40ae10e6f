use std::sync::Arc;

use tokio::sync::watch;

use quiz_core::model::{RankEntry, rank_entries};
use storage::repository::UserStatsRepository;

use crate::error::StatsError;
use crate::stats_service::StatsService;

/// Number of rows shown on the ranking screen.
pub const LEADERBOARD_SIZE: u32 = 10;

/// Ranked view over user totals.
#[derive(Clone)]
pub struct LeaderboardService {
    stats: Arc<dyn UserStatsRepository>,
    revisions: watch::Receiver<u64>,
}

impl LeaderboardService {
    /// Build a leaderboard that refreshes whenever `writer` records stats.
    #[must_use]
    pub fn new(stats: Arc<dyn UserStatsRepository>, writer: &StatsService) -> Self {
        Self {
            stats,
            revisions: writer.revisions(),
        }
    }

    /// Current top `limit` users, best first.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the query fails.
    pub async fn top(&self, limit: u32) -> Result<Vec<RankEntry>, StatsError> {
        let ordered = self.stats.top_by_correct(limit).await?;
        Ok(rank_entries(ordered))
    }

    /// Live feed of the top `limit` users.
    ///
    /// The first `next()` yields the current snapshot; each later call waits
    /// for a stats write and yields a fresh one. Dropping the subscription
    /// unsubscribes.
    #[must_use]
    pub fn subscribe(&self, limit: u32) -> LeaderboardSubscription {
        let mut board = self.clone();
        board.revisions.mark_unchanged();
        LeaderboardSubscription {
            board,
            limit,
            primed: false,
        }
    }
}

/// Push-style leaderboard feed returned by `LeaderboardService::subscribe`.
pub struct LeaderboardSubscription {
    board: LeaderboardService,
    limit: u32,
    primed: bool,
}

impl LeaderboardSubscription {
    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the stats writer is gone and no further updates
    /// can arrive.
    pub async fn next(&mut self) -> Option<Result<Vec<RankEntry>, StatsError>> {
        if self.primed {
            self.board.revisions.changed().await.ok()?;
        } else {
            self.primed = true;
        }
        self.board.revisions.mark_unchanged();
        Some(self.board.top(self.limit).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Identity, QuestionDraft};
    use quiz_core::scoring::score;
    use std::time::Duration;
    use storage::repository::InMemoryRepository;

    async fn record(stats: &StatsService, email: &str, correct: usize, total: usize) {
        let questions: Vec<_> = (0..total)
            .map(|i| {
                QuestionDraft {
                    id: format!("q{i}"),
                    prompt: "p".into(),
                    passage: None,
                    box_text: None,
                    image: None,
                    options: vec!["a".into(), "b".into()],
                    correct_index: 0,
                    explanation: String::new(),
                    subject: "s".into(),
                }
                .validate()
                .unwrap()
            })
            .collect();
        let answers: Vec<_> = (0..total).map(|i| Some(usize::from(i >= correct))).collect();
        let report = score(&questions, &answers).unwrap();
        let identity = Identity::from_email(email).unwrap();
        stats.record_session(&identity, &report).await.unwrap();
    }

    fn services() -> (StatsService, LeaderboardService) {
        let repo = Arc::new(InMemoryRepository::new());
        let stats = StatsService::new(repo.clone());
        let board = LeaderboardService::new(repo, &stats);
        (stats, board)
    }

    #[tokio::test]
    async fn top_is_ranked_by_correct() {
        let (stats, board) = services();
        record(&stats, "low@x", 1, 5).await;
        record(&stats, "high@x", 4, 5).await;

        let top = board.top(LEADERBOARD_SIZE).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[0].stats.user_id().as_str(), "high@x");
        assert_eq!(top[1].rank, 2);
    }

    #[tokio::test]
    async fn subscription_yields_snapshot_then_updates() {
        let (stats, board) = services();
        record(&stats, "early@x", 1, 1).await;

        let mut feed = board.subscribe(LEADERBOARD_SIZE);
        let first = feed.next().await.unwrap().unwrap();
        assert_eq!(first.len(), 1);

        record(&stats, "late@x", 3, 3).await;
        let second = tokio::time::timeout(Duration::from_secs(1), feed.next())
            .await
            .expect("update arrives")
            .unwrap()
            .unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].stats.user_id().as_str(), "late@x");
    }

    #[tokio::test]
    async fn subscription_waits_without_writes() {
        let (_stats, board) = services();
        let mut feed = board.subscribe(LEADERBOARD_SIZE);
        feed.next().await.unwrap().unwrap();

        let pending = tokio::time::timeout(Duration::from_millis(50), feed.next()).await;
        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn subscription_ends_when_writer_dropped() {
        let (stats, board) = services();
        let mut feed = board.subscribe(LEADERBOARD_SIZE);
        feed.next().await.unwrap().unwrap();

        drop(stats);
        drop(board);
        assert!(feed.next().await.is_none());
    }
}
