//! Dimension score repository

use std::collections::HashMap;

use sqlx::PgConnection;

use crate::db::rows::UserScoreRow;
use crate::db::DbError;
use crate::models::Score;

/// Score repository
pub struct ScoreRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> ScoreRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// All scores of a user, oldest first.
    pub async fn list_for_user(&mut self, user_id: i32) -> Result<Vec<UserScoreRow>, DbError> {
        let rows = sqlx::query_as::<_, UserScoreRow>(
            r#"
            SELECT id, user_id, dimension_name, score
            FROM user_scores
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// Map of dimension name to row id for a user.
    pub async fn ids_by_dimension(&mut self, user_id: i32) -> Result<HashMap<String, i32>, DbError> {
        let rows = self.list_for_user(user_id).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.dimension_name, row.id))
            .collect())
    }

    pub async fn insert(
        &mut self,
        user_id: i32,
        dimension_name: &str,
        score: Score,
    ) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO user_scores (user_id, dimension_name, score)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(dimension_name)
        .bind(score.value())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    pub async fn set_score(&mut self, id: i32, score: Score) -> Result<(), DbError> {
        sqlx::query("UPDATE user_scores SET score = $2 WHERE id = $1")
            .bind(id)
            .bind(score.value())
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }
}
