use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Counts contributed by one finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounts {
    pub solved: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl SessionCounts {
    /// Build counts from a total and a correct count; `incorrect` is derived.
    #[must_use]
    pub fn from_totals(solved: u32, correct: u32) -> Self {
        Self {
            solved,
            correct,
            incorrect: solved.saturating_sub(correct),
        }
    }
}

/// Running per-user totals across all sessions.
///
/// Counters only ever grow: a record is created from the first session and
/// afterwards merged additively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    user_id: UserId,
    email: Option<String>,
    total_solved: u32,
    total_correct: u32,
    total_incorrect: u32,
}

impl UserStats {
    /// A zeroed record, as created at sign-up.
    #[must_use]
    pub fn empty(user_id: UserId, email: Option<String>) -> Self {
        Self {
            user_id,
            email,
            total_solved: 0,
            total_correct: 0,
            total_incorrect: 0,
        }
    }

    /// The record created for an identity's first saved session.
    #[must_use]
    pub fn from_session(user_id: UserId, email: Option<String>, counts: SessionCounts) -> Self {
        Self::empty(user_id, email).merged(counts)
    }

    /// Rehydrate from storage.
    #[must_use]
    pub fn from_persisted(
        user_id: UserId,
        email: Option<String>,
        total_solved: u32,
        total_correct: u32,
        total_incorrect: u32,
    ) -> Self {
        Self {
            user_id,
            email,
            total_solved,
            total_correct,
            total_incorrect,
        }
    }

    /// Add a session's counts to the running totals.
    #[must_use]
    pub fn merged(mut self, counts: SessionCounts) -> Self {
        self.total_solved = self.total_solved.saturating_add(counts.solved);
        self.total_correct = self.total_correct.saturating_add(counts.correct);
        self.total_incorrect = self.total_incorrect.saturating_add(counts.incorrect);
        self
    }

    /// Take `email` when one is supplied, keep the stored one otherwise.
    #[must_use]
    pub fn with_latest_email(mut self, email: Option<String>) -> Self {
        if email.is_some() {
            self.email = email;
        }
        self
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn total_solved(&self) -> u32 {
        self.total_solved
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    #[must_use]
    pub fn total_incorrect(&self) -> u32 {
        self.total_incorrect
    }

    /// Rounded share of correct answers, 0 when nothing was solved yet.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        if self.total_solved == 0 {
            return 0;
        }
        let pct = f64::from(self.total_correct) * 100.0 / f64::from(self.total_solved);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = pct.round() as u32;
        rounded.min(100)
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    /// 1-based position.
    pub rank: usize,
    pub stats: UserStats,
}

/// Number each entry of an already ordered list, starting at 1.
#[must_use]
pub fn rank_entries(ordered: Vec<UserStats>) -> Vec<RankEntry> {
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, stats)| RankEntry { rank: i + 1, stats })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("a@example.com").unwrap()
    }

    #[test]
    fn latest_email_only_replaces_when_supplied() {
        let stats = UserStats::empty(user(), None).with_latest_email(Some("a@example.com".into()));
        assert_eq!(stats.email(), Some("a@example.com"));
        let stats = stats.with_latest_email(None);
        assert_eq!(stats.email(), Some("a@example.com"));
    }

    #[test]
    fn first_session_equals_session_counts() {
        let counts = SessionCounts::from_totals(10, 7);
        let stats = UserStats::from_session(user(), None, counts);
        assert_eq!(stats.total_solved(), 10);
        assert_eq!(stats.total_correct(), 7);
        assert_eq!(stats.total_incorrect(), 3);
    }

    #[test]
    fn merge_is_additive() {
        let counts = SessionCounts::from_totals(4, 1);
        let stats = UserStats::from_session(user(), None, counts).merged(counts);
        assert_eq!(stats.total_solved(), 8);
        assert_eq!(stats.total_correct(), 2);
        assert_eq!(stats.total_incorrect(), 6);
    }

    #[test]
    fn accuracy_rounds_and_handles_zero() {
        assert_eq!(UserStats::empty(user(), None).accuracy(), 0);
        let stats = UserStats::from_persisted(user(), None, 3, 2, 1);
        assert_eq!(stats.accuracy(), 67);
    }

    #[test]
    fn rank_entries_are_one_based() {
        let entries = rank_entries(vec![
            UserStats::from_persisted(user(), None, 3, 3, 0),
            UserStats::from_persisted(UserId::new("b").unwrap(), None, 3, 1, 2),
        ]);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].rank, 2);
        assert_eq!(entries[1].stats.user_id().as_str(), "b");
    }
}
