//! Feedback repository - append only

use sqlx::PgPool;

#[cfg(test)]
use crate::db::rows::FeedbackRow;
use crate::db::DbError;
use crate::models::FeedbackEntry;

/// Feedback repository
pub struct FeedbackRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedbackRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a feedback row and return its generated id. Duplicates are kept.
    pub async fn create(&self, entry: &FeedbackEntry) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO feedbacks (selected_text, feedback)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(entry.selected_text.as_str())
        .bind(entry.feedback.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Read back a row. Only the database tests need this.
    #[cfg(test)]
    pub async fn get(&self, id: i32) -> Result<Option<FeedbackRow>, DbError> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            "SELECT id, selected_text, feedback FROM feedbacks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}
