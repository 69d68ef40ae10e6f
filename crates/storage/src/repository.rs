use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId, SessionCounts, Subject, UserId, UserStats};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the question bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert or replace a batch of questions, keyed by id.
    ///
    /// Either every question is written or none is.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the batch cannot be stored.
    async fn upsert_questions(&self, questions: &[Question]) -> Result<(), StorageError>;

    /// Fetch a question by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_question(&self, id: &QuestionId) -> Result<Option<Question>, StorageError>;

    /// List questions ordered by id, optionally restricted to one subject.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_questions(&self, subject: Option<&Subject>)
    -> Result<Vec<Question>, StorageError>;

    /// Distinct subjects present in the bank, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError>;

    /// Remove a question; returns whether anything was deleted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn delete_question(&self, id: &QuestionId) -> Result<bool, StorageError>;
}

/// Repository contract for per-user running totals.
#[async_trait]
pub trait UserStatsRepository: Send + Sync {
    /// Fetch a user's totals, `None` when the user has no record yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_stats(&self, user_id: &UserId) -> Result<Option<UserStats>, StorageError>;

    /// Create a zeroed record if none exists and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn ensure_stats(
        &self,
        user_id: &UserId,
        email: Option<&str>,
    ) -> Result<UserStats, StorageError>;

    /// Merge one session into a user's totals: create the record from the
    /// session's counts when absent, otherwise add to the existing counters.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn add_session(
        &self,
        user_id: &UserId,
        email: Option<&str>,
        counts: SessionCounts,
    ) -> Result<UserStats, StorageError>;

    /// Top `limit` users by total correct answers, best first.
    ///
    /// Ties are broken by fewer questions solved, then by user id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn top_by_correct(&self, limit: u32) -> Result<Vec<UserStats>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<BTreeMap<QuestionId, Question>>>,
    stats: Arc<Mutex<BTreeMap<UserId, UserStats>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn upsert_questions(&self, questions: &[Question]) -> Result<(), StorageError> {
        let mut guard = self.questions.lock().map_err(poisoned)?;
        for question in questions {
            guard.insert(question.id().clone(), question.clone());
        }
        Ok(())
    }

    async fn get_question(&self, id: &QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    async fn list_questions(
        &self,
        subject: Option<&Subject>,
    ) -> Result<Vec<Question>, StorageError> {
        let guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard
            .values()
            .filter(|q| subject.is_none_or(|s| q.subject() == s))
            .cloned()
            .collect())
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        let guard = self.questions.lock().map_err(poisoned)?;
        let mut subjects: Vec<Subject> = guard.values().map(|q| q.subject().clone()).collect();
        subjects.sort();
        subjects.dedup();
        Ok(subjects)
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<bool, StorageError> {
        let mut guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard.remove(id).is_some())
    }
}

#[async_trait]
impl UserStatsRepository for InMemoryRepository {
    async fn get_stats(&self, user_id: &UserId) -> Result<Option<UserStats>, StorageError> {
        let guard = self.stats.lock().map_err(poisoned)?;
        Ok(guard.get(user_id).cloned())
    }

    async fn ensure_stats(
        &self,
        user_id: &UserId,
        email: Option<&str>,
    ) -> Result<UserStats, StorageError> {
        let mut guard = self.stats.lock().map_err(poisoned)?;
        let stats = guard
            .entry(user_id.clone())
            .or_insert_with(|| UserStats::empty(user_id.clone(), email.map(str::to_owned)));
        Ok(stats.clone())
    }

    async fn add_session(
        &self,
        user_id: &UserId,
        email: Option<&str>,
        counts: SessionCounts,
    ) -> Result<UserStats, StorageError> {
        let mut guard = self.stats.lock().map_err(poisoned)?;
        let updated = match guard.remove(user_id) {
            Some(existing) => existing
                .with_latest_email(email.map(str::to_owned))
                .merged(counts),
            None => UserStats::from_session(user_id.clone(), email.map(str::to_owned), counts),
        };
        guard.insert(user_id.clone(), updated.clone());
        Ok(updated)
    }

    async fn top_by_correct(&self, limit: u32) -> Result<Vec<UserStats>, StorageError> {
        let guard = self.stats.lock().map_err(poisoned)?;
        let mut all: Vec<UserStats> = guard.values().cloned().collect();
        all.sort_by_key(|s| (Reverse(s.total_correct()), s.total_solved(), s.user_id().clone()));
        all.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(all)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub stats: Arc<dyn UserStatsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let stats: Arc<dyn UserStatsRepository> = Arc::new(repo);
        Self { questions, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;

    fn build_question(id: &str, subject: &str) -> Question {
        QuestionDraft {
            id: id.into(),
            prompt: format!("Q {id}"),
            passage: None,
            box_text: None,
            image: None,
            options: vec!["A".into(), "B".into()],
            correct_index: 0,
            explanation: String::new(),
            subject: subject.into(),
        }
        .validate()
        .unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn filters_questions_by_subject() {
        let repo = InMemoryRepository::new();
        repo.upsert_questions(&[
            build_question("r2", "reading"),
            build_question("g1", "grammar"),
            build_question("r1", "reading"),
        ])
        .await
        .unwrap();

        let reading = Subject::new("reading").unwrap();
        let listed = repo.list_questions(Some(&reading)).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, ["r1", "r2"]);

        assert_eq!(repo.list_questions(None).await.unwrap().len(), 3);
        let subjects = repo.list_subjects().await.unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].as_str(), "grammar");
    }

    #[tokio::test]
    async fn upsert_replaces_by_id_and_delete_removes() {
        let repo = InMemoryRepository::new();
        repo.upsert_questions(&[build_question("q1", "reading")])
            .await
            .unwrap();
        repo.upsert_questions(&[build_question("q1", "grammar")])
            .await
            .unwrap();

        let id = QuestionId::new("q1").unwrap();
        let stored = repo.get_question(&id).await.unwrap().unwrap();
        assert_eq!(stored.subject().as_str(), "grammar");

        assert!(repo.delete_question(&id).await.unwrap());
        assert!(!repo.delete_question(&id).await.unwrap());
        assert!(repo.get_question(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_session_creates_then_accumulates() {
        let repo = InMemoryRepository::new();
        let counts = SessionCounts::from_totals(5, 3);

        let first = repo.add_session(&user("a"), Some("a@x"), counts).await.unwrap();
        assert_eq!(first.total_solved(), 5);
        assert_eq!(first.total_correct(), 3);
        assert_eq!(first.total_incorrect(), 2);

        let second = repo.add_session(&user("a"), Some("a@x"), counts).await.unwrap();
        assert_eq!(second.total_solved(), 10);
        assert_eq!(second.total_correct(), 6);
        assert_eq!(second.total_incorrect(), 4);
    }

    #[tokio::test]
    async fn ensure_stats_never_resets() {
        let repo = InMemoryRepository::new();
        repo.add_session(&user("a"), None, SessionCounts::from_totals(2, 2))
            .await
            .unwrap();
        let stats = repo.ensure_stats(&user("a"), None).await.unwrap();
        assert_eq!(stats.total_correct(), 2);

        let fresh = repo.ensure_stats(&user("b"), Some("b@x")).await.unwrap();
        assert_eq!(fresh.total_solved(), 0);
        assert_eq!(fresh.email(), Some("b@x"));
    }

    #[tokio::test]
    async fn add_session_fills_in_email_missing_at_sign_up() {
        let repo = InMemoryRepository::new();
        repo.ensure_stats(&user("u"), None).await.unwrap();

        let played = repo
            .add_session(&user("u"), Some("u@x"), SessionCounts::from_totals(1, 1))
            .await
            .unwrap();
        assert_eq!(played.email(), Some("u@x"));

        let anonymous_write = repo
            .add_session(&user("u"), None, SessionCounts::from_totals(1, 0))
            .await
            .unwrap();
        assert_eq!(anonymous_write.email(), Some("u@x"));
    }

    #[tokio::test]
    async fn top_by_correct_orders_and_limits() {
        let repo = InMemoryRepository::new();
        repo.add_session(&user("low"), None, SessionCounts::from_totals(10, 1))
            .await
            .unwrap();
        repo.add_session(&user("high"), None, SessionCounts::from_totals(10, 9))
            .await
            .unwrap();
        repo.add_session(&user("tie-efficient"), None, SessionCounts::from_totals(3, 1))
            .await
            .unwrap();

        let top = repo.top_by_correct(2).await.unwrap();
        let ids: Vec<_> = top.iter().map(|s| s.user_id().as_str()).collect();
        assert_eq!(ids, ["high", "tie-efficient"]);
    }
}
