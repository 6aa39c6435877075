//! Storage error type

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// A write lost a uniqueness race (e.g. two first submissions of the same user).
    /// Safe to retry.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return Self::Conflict(db.message().to_owned());
            }
        }
        Self::Sqlx(e)
    }
}
