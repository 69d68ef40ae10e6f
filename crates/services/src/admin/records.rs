use rand::{Rng, rng};
use serde::Deserialize;
use serde_json::Value;

use quiz_core::model::QuestionDraft;

use crate::error::UploadError;

/// Length of generated question ids.
pub const GENERATED_ID_LEN: usize = 9;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One question as it appears in an uploaded or served JSON file.
///
/// Several historical field spellings are accepted; they all land on the
/// same canonical field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, alias = "question", alias = "text")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub passage: Option<String>,
    #[serde(default, alias = "choices")]
    pub options: Option<Vec<String>>,
    #[serde(default, alias = "answer", alias = "correct", alias = "correctOptionIndex")]
    pub correct_index: Option<usize>,
    #[serde(default, alias = "memo")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub use_box: Option<bool>,
    #[serde(default)]
    pub smart_box_data: Option<String>,
    #[serde(default)]
    pub box_text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub tags: Option<UploadTags>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadTags {
    #[serde(default)]
    pub subject: Option<String>,
}

impl UploadRecord {
    /// Map onto the canonical question shape.
    ///
    /// `fallback_subject` is used when the record names no subject of its own.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Invalid` when the prompt, options, correct index,
    /// or subject is missing, or when the id is neither a string nor a number.
    pub fn into_draft(
        self,
        index: usize,
        fallback_subject: Option<&str>,
    ) -> Result<QuestionDraft, UploadError> {
        let invalid = |reason: &str| UploadError::Invalid {
            index,
            reason: reason.to_owned(),
        };

        let id = match self.id {
            None | Some(Value::Null) => generate_id(),
            Some(Value::String(s)) if s.trim().is_empty() => generate_id(),
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => return Err(invalid("id must be a string or a number")),
        };

        let prompt = self.prompt.ok_or_else(|| invalid("missing question text"))?;
        let options = self.options.ok_or_else(|| invalid("missing options"))?;
        let correct_index = self
            .correct_index
            .ok_or_else(|| invalid("missing correct option index"))?;

        let subject = self
            .subject
            .or_else(|| self.tags.and_then(|t| t.subject))
            .or_else(|| fallback_subject.map(str::to_owned))
            .ok_or_else(|| invalid("missing subject"))?;

        let box_text = match (self.use_box, self.smart_box_data) {
            (Some(true), Some(data)) => Some(data),
            _ => self.box_text,
        };

        Ok(QuestionDraft {
            id,
            prompt,
            passage: self.passage,
            box_text,
            image: self.image,
            options,
            correct_index,
            explanation: self.explanation.unwrap_or_default(),
            subject,
        })
    }
}

/// Random lowercase base-36 id for records that arrive without one.
#[must_use]
pub fn generate_id() -> String {
    let mut rng = rng();
    (0..GENERATED_ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// Parse JSON text holding one question object or an array of them.
///
/// # Errors
///
/// Returns `UploadError::Json` when the text is not JSON at all, and
/// `UploadError::Invalid` with the record position when a record cannot be
/// mapped.
pub fn parse_drafts(
    text: &str,
    fallback_subject: Option<&str>,
) -> Result<Vec<QuestionDraft>, UploadError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(UploadError::Invalid {
                index: 0,
                reason: "expected a question object or an array of them".into(),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: UploadRecord =
                serde_json::from_value(item).map_err(|e| UploadError::Invalid {
                    index,
                    reason: e.to_string(),
                })?;
            record.into_draft(index, fallback_subject)
        })
        .collect()
}
