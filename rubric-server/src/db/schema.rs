//! Table bootstrap
//!
//! Creates the three tables when absent. Existing tables are left untouched,
//! even if their shape differs.

use sqlx::PgPool;

use super::DbError;

/// Ensure `users`, `user_scores` and `feedbacks` exist
pub async fn ensure(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring survey tables exist...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            degree VARCHAR(255) NOT NULL,
            topic VARCHAR(255) NOT NULL,
            total_score INTEGER NOT NULL,
            CONSTRAINT unique_user UNIQUE (name, degree, topic)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // No uniqueness on (user_id, dimension_name): the upsert path looks up before inserting
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_scores (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            dimension_name VARCHAR(255) NOT NULL,
            score INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedbacks (
            id SERIAL PRIMARY KEY,
            selected_text TEXT NOT NULL,
            feedback TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_name ON users(name)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_scores_user ON user_scores(user_id)")
        .execute(pool)
        .await?;

    tracing::info!("Survey tables ready");
    Ok(())
}
