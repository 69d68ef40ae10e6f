use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{IdError, QuestionId};

/// Minimum number of options a multiple-choice question must carry.
pub const MIN_OPTIONS: usize = 2;

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// Category tag partitioning the question bank (e.g. "grammar", "reading").
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(String);

impl Subject {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptySubject` if the value is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, QuestionError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::EmptySubject);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject({})", self.0)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Subject {
    type Error = QuestionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.0
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question content, as authored externally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: String,
    pub prompt: String,
    pub passage: Option<String>,
    pub box_text: Option<String>,
    pub image: Option<String>,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub subject: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// Blank optional texts are normalized to `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the id, prompt, or subject is blank, when
    /// fewer than two options are given, when an option is blank, or when the
    /// correct index does not point at an option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = QuestionId::new(self.id)?;

        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if self.options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                len: self.options.len(),
            });
        }

        if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }

        if self.correct_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len: self.options.len(),
            });
        }

        let subject = Subject::new(self.subject)?;

        Ok(Question {
            id,
            prompt: self.prompt,
            passage: non_blank(self.passage),
            box_text: non_blank(self.box_text),
            image: non_blank(self.image),
            options: self.options,
            correct_index: self.correct_index,
            explanation: self.explanation,
            subject,
            updated_at: None,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// One multiple-choice assessment item.
///
/// Content is immutable once validated; only the upload timestamp can be
/// attached afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    passage: Option<String>,
    box_text: Option<String>,
    image: Option<String>,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
    subject: Subject,
    updated_at: Option<DateTime<Utc>>,
}

impl Question {
    /// Attach the time this question was last written to the bank.
    #[must_use]
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn passage(&self) -> Option<&str> {
        self.passage.as_deref()
    }

    #[must_use]
    pub fn box_text(&self) -> Option<&str> {
        self.box_text.as_deref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns true when `selected` is this question's correct option.
    #[must_use]
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_index)
    }

    /// Convert back into a draft, e.g. to re-validate persisted content.
    #[must_use]
    pub fn into_draft(self) -> QuestionDraft {
        QuestionDraft {
            id: self.id.into(),
            prompt: self.prompt,
            passage: self.passage,
            box_text: self.box_text,
            image: self.image,
            options: self.options,
            correct_index: self.correct_index,
            explanation: self.explanation,
            subject: self.subject.into(),
        }
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error(transparent)]
    Id(#[from] IdError),

    #[error("question prompt must not be empty")]
    EmptyPrompt,

    #[error("subject must not be empty")]
    EmptySubject,

    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct option {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
