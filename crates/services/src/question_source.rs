use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use quiz_core::model::{Question, Subject};
use storage::repository::QuestionRepository;

use crate::admin::parse_drafts;
use crate::error::{QuestionSourceError, UploadError};

/// Where a category's question set comes from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Every question in the category, in source order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` when the set cannot be fetched or parsed.
    async fn questions_for(&self, subject: &Subject) -> Result<Vec<Question>, QuestionSourceError>;
}

//
// ─── STORED ────────────────────────────────────────────────────────────────────
//

/// Reads a category from the local question bank.
#[derive(Clone)]
pub struct StoredQuestionSource {
    questions: Arc<dyn QuestionRepository>,
}

impl StoredQuestionSource {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for StoredQuestionSource {
    async fn questions_for(&self, subject: &Subject) -> Result<Vec<Question>, QuestionSourceError> {
        Ok(self.questions.list_questions(Some(subject)).await?)
    }
}

//
// ─── HTTP ──────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct HttpSourceConfig {
    pub base_url: String,
}

impl HttpSourceConfig {
    /// `None` when the URL is blank.
    #[must_use]
    pub fn from_base_url(base_url: &str) -> Option<Self> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            base_url: trimmed.to_owned(),
        })
    }
}

/// Fetches `{base_url}/questions/{subject}.json` over HTTP.
#[derive(Clone)]
pub struct HttpQuestionSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(config: HttpSourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url_for(&self, subject: &Subject) -> String {
        format!(
            "{}/questions/{}.json",
            self.config.base_url.trim_end_matches('/'),
            subject.as_str()
        )
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn questions_for(&self, subject: &Subject) -> Result<Vec<Question>, QuestionSourceError> {
        let url = self.url_for(subject);
        tracing::debug!(%url, "fetching question set");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let drafts = parse_drafts(&body, Some(subject.as_str()))?;
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(index, mut draft)| {
                // The file's location decides the category, not its tags.
                draft.subject = subject.as_str().to_owned();
                draft.validate().map_err(|e| UploadError::Invalid {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_ignores_blank_url() {
        assert!(HttpSourceConfig::from_base_url("   ").is_none());
        let config = HttpSourceConfig::from_base_url(" http://localhost:8080/ ").unwrap();
        let source = HttpQuestionSource::new(config);
        let subject = Subject::new("grammar").unwrap();
        assert_eq!(
            source.url_for(&subject),
            "http://localhost:8080/questions/grammar.json"
        );
    }
}
