use quiz_core::model::{Question, QuestionDraft, UserId, UserStats};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn options_to_json(options: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(options).map_err(ser)
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let options_json: String = row.try_get("options").map_err(ser)?;
    let options: Vec<String> = serde_json::from_str(&options_json).map_err(ser)?;

    let correct_i64: i64 = row.try_get("correct_index").map_err(ser)?;
    let correct_index = usize::try_from(correct_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid correct_index: {correct_i64}")))?;

    let draft = QuestionDraft {
        id: row.try_get("id").map_err(ser)?,
        prompt: row.try_get("prompt").map_err(ser)?,
        passage: row.try_get("passage").map_err(ser)?,
        box_text: row.try_get("box_text").map_err(ser)?,
        image: row.try_get("image").map_err(ser)?,
        options,
        correct_index,
        explanation: row.try_get("explanation").map_err(ser)?,
        subject: row.try_get("subject").map_err(ser)?,
    };

    let question = draft.validate().map_err(ser)?;
    let updated_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("updated_at").map_err(ser)?;

    Ok(match updated_at {
        Some(at) => question.with_updated_at(at),
        None => question,
    })
}

pub(crate) fn map_stats_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserStats, StorageError> {
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    let user_id = UserId::new(user_id).map_err(ser)?;

    Ok(UserStats::from_persisted(
        user_id,
        row.try_get("email").map_err(ser)?,
        u32_from_i64("total_solved", row.try_get("total_solved").map_err(ser)?)?,
        u32_from_i64("total_correct", row.try_get("total_correct").map_err(ser)?)?,
        u32_from_i64("total_incorrect", row.try_get("total_incorrect").map_err(ser)?)?,
    ))
}
