//! User repository
//!
//! Runs on a borrowed connection so that lookup, insert and update all happen
//! inside the caller's transaction.

use sqlx::PgConnection;

#[cfg(test)]
use crate::db::rows::UserRow;
use crate::db::DbError;
use crate::models::{Identity, Score};

/// User repository
pub struct UserRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> UserRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// Find a user by natural key and lock the row until the transaction ends.
    pub async fn find_for_update(&mut self, identity: &Identity) -> Result<Option<i32>, DbError> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT id FROM users
            WHERE name = $1 AND degree = $2 AND topic = $3
            FOR UPDATE
            "#,
        )
        .bind(identity.name.as_str())
        .bind(identity.degree.as_str())
        .bind(identity.topic.as_str())
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row.map(|(id,)| id))
    }

    /// Insert a new user and return its generated id.
    ///
    /// A concurrent insert of the same natural key fails with
    /// [`DbError::Conflict`].
    pub async fn insert(&mut self, identity: &Identity) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO users (name, degree, topic, total_score)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(identity.name.as_str())
        .bind(identity.degree.as_str())
        .bind(identity.topic.as_str())
        .bind(identity.total_score.value())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    /// Overwrite the aggregate score (last write wins).
    pub async fn set_total_score(&mut self, id: i32, total_score: Score) -> Result<(), DbError> {
        sqlx::query("UPDATE users SET total_score = $2 WHERE id = $1")
            .bind(id)
            .bind(total_score.value())
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    /// Get a user by surrogate id. Only the database tests need this.
    #[cfg(test)]
    pub async fn get(&mut self, id: i32) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, degree, topic, total_score FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row)
    }
}
