use quiz_core::model::{Question, QuestionId, Subject};
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{conn, map_question_row, options_to_json, ser},
};
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn upsert_questions(&self, questions: &[Question]) -> Result<(), StorageError> {
        if questions.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(conn)?;

        for question in questions {
            let correct_index = i64::try_from(question.correct_index())
                .map_err(|_| StorageError::Serialization("correct_index overflow".into()))?;

            sqlx::query(
                r"
                INSERT INTO questions (
                    id, subject, prompt, passage, box_text, image,
                    options, correct_index, explanation, updated_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                ON CONFLICT(id) DO UPDATE SET
                    subject = excluded.subject,
                    prompt = excluded.prompt,
                    passage = excluded.passage,
                    box_text = excluded.box_text,
                    image = excluded.image,
                    options = excluded.options,
                    correct_index = excluded.correct_index,
                    explanation = excluded.explanation,
                    updated_at = excluded.updated_at
                ",
            )
            .bind(question.id().as_str())
            .bind(question.subject().as_str())
            .bind(question.prompt())
            .bind(question.passage())
            .bind(question.box_text())
            .bind(question.image())
            .bind(options_to_json(question.options())?)
            .bind(correct_index)
            .bind(question.explanation())
            .bind(question.updated_at())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn get_question(&self, id: &QuestionId) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, subject, prompt, passage, box_text, image,
                   options, correct_index, explanation, updated_at
            FROM questions
            WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn list_questions(
        &self,
        subject: Option<&Subject>,
    ) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, subject, prompt, passage, box_text, image,
                   options, correct_index, explanation, updated_at
            FROM questions
            WHERE ?1 IS NULL OR subject = ?1
            ORDER BY id ASC
            ",
        )
        .bind(subject.map(Subject::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_question_row).collect()
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        let rows = sqlx::query("SELECT DISTINCT subject FROM questions ORDER BY subject ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter()
            .map(|row| {
                let name: String = row.try_get("subject").map_err(ser)?;
                Subject::new(name).map_err(ser)
            })
            .collect()
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(result.rows_affected() > 0)
    }
}
