//! Storage seam between the HTTP boundary and a concrete database

use async_trait::async_trait;

use super::DbError;
use crate::models::{FeedbackEntry, Submission, SubmissionReceipt};

/// Persistence operations needed by the HTTP handlers.
///
/// Implementations must make [`SurveyStore::record_submission`] all-or-nothing
/// and must never create two users with the same natural key.
#[async_trait]
pub trait SurveyStore: Send + Sync + 'static {
    /// Create the survey tables if they do not exist yet.
    async fn ensure_schema(&self) -> Result<(), DbError>;

    /// Upsert the user identified by `(name, degree, topic)` and reconcile its
    /// dimension scores.
    async fn record_submission(&self, submission: &Submission)
        -> Result<SubmissionReceipt, DbError>;

    /// Append one feedback row, returning its id.
    async fn record_feedback(&self, entry: &FeedbackEntry) -> Result<i32, DbError>;

    /// Release backing resources. Called once at shutdown.
    async fn close(&self) {}
}
