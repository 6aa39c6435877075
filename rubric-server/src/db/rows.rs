//! Row types for the three survey tables

use sqlx::FromRow;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub degree: String,
    pub topic: String,
    pub total_score: i32,
}

/// Per-dimension score record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserScoreRow {
    pub id: i32,
    pub user_id: i32,
    pub dimension_name: String,
    pub score: i32,
}

/// Feedback record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FeedbackRow {
    pub id: i32,
    pub selected_text: String,
    pub feedback: String,
}
