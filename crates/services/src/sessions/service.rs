use chrono::{DateTime, Utc};

use quiz_core::model::{Question, Subject};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION KIND ──────────────────────────────────────────────────────────────
//

/// How the question set of a session was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Randomly sampled from a whole category.
    Fresh,
    /// The incorrect subset of an earlier attempt, in its original order.
    Retry,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt in progress.
///
/// Holds a fixed, ordered question list, the cursor, and one answer slot per
/// question. Navigation is free in both directions and answers can be changed
/// until the session is finalized.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    position: usize,
    subject: Subject,
    kind: SessionKind,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Start a session over the given questions, positioned on the first one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn load(
        questions: Vec<Question>,
        subject: Subject,
        kind: SessionKind,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            answers,
            position: 0,
            subject,
            kind,
            started_at,
        })
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// Zero-based index of the question on screen.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.position]
    }

    #[must_use]
    pub fn selected_for_current(&self) -> Option<usize> {
        self.answers[self.position]
    }

    /// Number of questions with an answer recorded.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.total() - self.answered_count()
    }

    /// True when at least one question has no answer; callers confirm with
    /// the user before finalizing in that case.
    #[must_use]
    pub fn has_unanswered(&self) -> bool {
        self.answers.iter().any(Option::is_none)
    }

    /// Unanswered questions never block submission.
    #[must_use]
    pub fn can_finalize(&self) -> bool {
        true
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            answered: self.answered_count(),
            position: self.position,
            is_last: self.is_last(),
        }
    }

    /// Record (or overwrite) the answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidOption` if `option_index` is not one of
    /// the current question's options.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), SessionError> {
        let len = self.current_question().option_count();
        if option_index >= len {
            return Err(SessionError::InvalidOption {
                index: option_index,
                len,
            });
        }
        self.answers[self.position] = Some(option_index);
        Ok(())
    }

    /// Move to the next question; no-op on the last one.
    pub fn advance(&mut self) {
        if !self.is_last() {
            self.position += 1;
        }
    }

    /// Move to the previous question; no-op on the first one.
    pub fn retreat(&mut self) {
        if !self.is_first() {
            self.position -= 1;
        }
    }

    /// Freeze the attempt for scoring.
    #[must_use]
    pub fn finalize(self) -> FinalizedSession {
        FinalizedSession {
            questions: self.questions,
            answers: self.answers,
            subject: self.subject,
            kind: self.kind,
            started_at: self.started_at,
        }
    }
}

/// A submitted attempt: the final question list and answers.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedSession {
    pub questions: Vec<Question>,
    pub answers: Vec<Option<usize>>,
    pub subject: Subject,
    pub kind: SessionKind,
    pub started_at: DateTime<Utc>,
}
