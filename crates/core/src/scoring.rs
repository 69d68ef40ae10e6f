use thiserror::Error;

use crate::model::{Question, QuestionId, SessionCounts};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("cannot score an empty question set")]
    Empty,
    #[error("{answers} answers recorded for {questions} questions")]
    LengthMismatch { questions: usize, answers: usize },
    #[error("question count {0} does not fit in u32")]
    TooManyQuestions(usize),
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Per-question result, in the order the questions were presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
}

impl QuestionOutcome {
    #[must_use]
    pub fn is_unanswered(&self) -> bool {
        self.selected.is_none()
    }
}

/// Derived result of one finished session. Never mutated after scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    correct_count: u32,
    total: u32,
    percentage: u32,
    outcomes: Vec<QuestionOutcome>,
    incorrect: Vec<Question>,
}

impl ScoreReport {
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.total - self.correct_count
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_unanswered()).count()
    }

    /// `round(100 * correct / total)`, always within `0..=100`.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    /// Questions answered wrongly or left unanswered, in presentation order.
    #[must_use]
    pub fn incorrect(&self) -> &[Question] {
        &self.incorrect
    }

    /// Position of a question within the result list.
    #[must_use]
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        self.outcomes.iter().position(|o| &o.question_id == id)
    }

    /// Counts to merge into a user's running totals.
    #[must_use]
    pub fn session_counts(&self) -> SessionCounts {
        SessionCounts::from_totals(self.total, self.correct_count)
    }
}

/// Nearest-integer percentage; halves round up.
#[must_use]
pub fn rounded_percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    // Integer form of round(100 * c / t) for non-negative inputs.
    let numerator = u64::from(correct) * 200 + u64::from(total);
    let pct = numerator / (u64::from(total) * 2);
    u32::try_from(pct.min(100)).unwrap_or(100)
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Score a finished session.
///
/// A question counts as correct only when an answer was given and it equals
/// the question's correct option.
///
/// # Errors
///
/// Returns `ScoreError::Empty` for an empty question set and
/// `ScoreError::LengthMismatch` when `answers` does not line up with
/// `questions`.
///
/// # Examples
///
/// ```
/// # use quiz_core::model::QuestionDraft;
/// # use quiz_core::scoring::score;
/// let question = QuestionDraft {
///     id: "q1".into(),
///     prompt: "Pick b".into(),
///     passage: None,
///     box_text: None,
///     image: None,
///     options: vec!["a".into(), "b".into()],
///     correct_index: 1,
///     explanation: String::new(),
///     subject: "grammar".into(),
/// }
/// .validate()
/// .unwrap();
///
/// let report = score(&[question], &[Some(1)]).unwrap();
/// assert_eq!(report.correct_count(), 1);
/// assert_eq!(report.percentage(), 100);
/// ```
pub fn score(questions: &[Question], answers: &[Option<usize>]) -> Result<ScoreReport, ScoreError> {
    if questions.is_empty() {
        return Err(ScoreError::Empty);
    }
    if questions.len() != answers.len() {
        return Err(ScoreError::LengthMismatch {
            questions: questions.len(),
            answers: answers.len(),
        });
    }

    let mut outcomes = Vec::with_capacity(questions.len());
    let mut incorrect = Vec::new();
    let mut correct_count = 0_u32;

    for (question, &selected) in questions.iter().zip(answers) {
        let is_correct = question.is_correct(selected);
        if is_correct {
            correct_count += 1;
        } else {
            incorrect.push(question.clone());
        }
        outcomes.push(QuestionOutcome {
            question_id: question.id().clone(),
            selected,
            correct_index: question.correct_index(),
            is_correct,
        });
    }

    let total = u32::try_from(questions.len())
        .map_err(|_| ScoreError::TooManyQuestions(questions.len()))?;

    Ok(ScoreReport {
        correct_count,
        total,
        percentage: rounded_percentage(correct_count, total),
        outcomes,
        incorrect,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
