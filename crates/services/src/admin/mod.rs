mod compress;
mod records;

use std::sync::Arc;

use quiz_core::model::{Question, QuestionDraft, QuestionId, Subject};
use storage::repository::QuestionRepository;

use crate::Clock;
use crate::error::UploadError;

pub use compress::{IMAGE_COMPRESS_THRESHOLD, JPEG_QUALITY, MAX_IMAGE_WIDTH, compress_image};
pub use records::{GENERATED_ID_LEN, UploadRecord, UploadTags, generate_id, parse_drafts};

/// Filter for the admin question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionTab {
    All,
    Subject(Subject),
}

impl QuestionTab {
    fn subject(&self) -> Option<&Subject> {
        match self {
            Self::All => None,
            Self::Subject(subject) => Some(subject),
        }
    }
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub ids: Vec<QuestionId>,
    pub images_compressed: usize,
}

impl UploadSummary {
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }
}

/// Bulk question import and bank maintenance for administrators.
#[derive(Clone)]
pub struct UploadService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
}

impl UploadService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, questions }
    }

    /// Validate, compress, stamp, and store every record in `json`.
    ///
    /// Nothing is written unless every record is valid.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Json` for unparseable input,
    /// `UploadError::Invalid` naming the first bad record,
    /// `UploadError::Empty` for an empty array, `UploadError::Compression` if
    /// the image worker dies, and `UploadError::Storage` when the batch write
    /// fails. Records sharing an id collapse to the last one.
    pub async fn upload_json(&self, json: &str) -> Result<UploadSummary, UploadError> {
        let drafts = parse_drafts(json, None)?;
        if drafts.is_empty() {
            return Err(UploadError::Empty);
        }

        // Image decoding is CPU-bound and runs on the blocking pool.
        let drafts = tokio::task::spawn_blocking(move || {
            drafts
                .into_iter()
                .map(compress_draft_image)
                .collect::<Vec<_>>()
        })
        .await?;

        let now = self.clock.now();
        let mut questions: Vec<(Question, bool)> = Vec::with_capacity(drafts.len());
        for (index, (draft, compressed)) in drafts.into_iter().enumerate() {
            let question = draft
                .validate()
                .map_err(|e| UploadError::Invalid {
                    index,
                    reason: e.to_string(),
                })?
                .with_updated_at(now);
            // A later record with the same id replaces the earlier one.
            questions.retain(|(kept, _)| kept.id() != question.id());
            questions.push((question, compressed));
        }
        let images_compressed = questions.iter().filter(|(_, compressed)| *compressed).count();
        let questions: Vec<Question> = questions.into_iter().map(|(q, _)| q).collect();

        self.questions.upsert_questions(&questions).await?;

        let ids: Vec<QuestionId> = questions.iter().map(|q| q.id().clone()).collect();
        tracing::info!(
            count = ids.len(),
            images_compressed,
            "uploaded question batch"
        );

        Ok(UploadSummary {
            ids,
            images_compressed,
        })
    }

    /// Questions under the given tab, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Storage` if the query fails.
    pub async fn list(&self, tab: &QuestionTab) -> Result<Vec<Question>, UploadError> {
        Ok(self.questions.list_questions(tab.subject()).await?)
    }

    /// Subjects currently present in the bank.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Storage` if the query fails.
    pub async fn subjects(&self) -> Result<Vec<Subject>, UploadError> {
        Ok(self.questions.list_subjects().await?)
    }

    /// Remove one question; returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Storage` if the delete fails.
    pub async fn delete(&self, id: &QuestionId) -> Result<bool, UploadError> {
        let removed = self.questions.delete_question(id).await?;
        tracing::info!(%id, removed, "deleted question");
        Ok(removed)
    }
}

fn compress_draft_image(mut draft: QuestionDraft) -> (QuestionDraft, bool) {
    let Some(original) = draft.image.take() else {
        return (draft, false);
    };
    let compressed = compress_image(&original);
    let changed = compressed != original;
    draft.image = Some(compressed);
    (draft, changed)
}
