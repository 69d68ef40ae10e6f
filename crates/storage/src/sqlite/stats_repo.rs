use quiz_core::model::{SessionCounts, UserId, UserStats};

use super::{
    SqliteRepository,
    mapping::{conn, map_stats_row},
};
use crate::repository::{StorageError, UserStatsRepository};

const SELECT_STATS: &str = r"
    SELECT user_id, email, total_solved, total_correct, total_incorrect
    FROM user_stats
    WHERE user_id = ?1
";

#[async_trait::async_trait]
impl UserStatsRepository for SqliteRepository {
    async fn get_stats(&self, user_id: &UserId) -> Result<Option<UserStats>, StorageError> {
        let row = sqlx::query(SELECT_STATS)
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_stats_row).transpose()
    }

    async fn ensure_stats(
        &self,
        user_id: &UserId,
        email: Option<&str>,
    ) -> Result<UserStats, StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO user_stats (user_id, email, total_solved, total_correct, total_incorrect)
            VALUES (?1, ?2, 0, 0, 0)
            ON CONFLICT(user_id) DO NOTHING
            ",
        )
        .bind(user_id.as_str())
        .bind(email)
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        let row = sqlx::query(SELECT_STATS)
            .bind(user_id.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(conn)?;

        tx.commit().await.map_err(conn)?;
        map_stats_row(&row)
    }

    async fn add_session(
        &self,
        user_id: &UserId,
        email: Option<&str>,
        counts: SessionCounts,
    ) -> Result<UserStats, StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        // Counters are added in SQL, never overwritten from a prior read.
        sqlx::query(
            r"
            INSERT INTO user_stats (user_id, email, total_solved, total_correct, total_incorrect)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id) DO UPDATE SET
                email = COALESCE(excluded.email, user_stats.email),
                total_solved = user_stats.total_solved + excluded.total_solved,
                total_correct = user_stats.total_correct + excluded.total_correct,
                total_incorrect = user_stats.total_incorrect + excluded.total_incorrect
            ",
        )
        .bind(user_id.as_str())
        .bind(email)
        .bind(i64::from(counts.solved))
        .bind(i64::from(counts.correct))
        .bind(i64::from(counts.incorrect))
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        let row = sqlx::query(SELECT_STATS)
            .bind(user_id.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(conn)?;

        tx.commit().await.map_err(conn)?;
        map_stats_row(&row)
    }

    async fn top_by_correct(&self, limit: u32) -> Result<Vec<UserStats>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT user_id, email, total_solved, total_correct, total_incorrect
            FROM user_stats
            ORDER BY total_correct DESC, total_solved ASC, user_id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_stats_row).collect()
    }
}
