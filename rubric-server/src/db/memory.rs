//! Process-local store
//!
//! Same semantics as [`PgStore`](super::PgStore) over plain vectors behind one
//! mutex. Nothing survives a restart. Used by tests and `rubric serve --ephemeral`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::reconcile::{plan_score_changes, tally, ScoreChange};
use super::rows::{FeedbackRow, UserRow, UserScoreRow};
use super::{DbError, SurveyStore};
use crate::models::{FeedbackEntry, Submission, SubmissionReceipt};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRow>,
    user_scores: Vec<UserScoreRow>,
    feedbacks: Vec<FeedbackRow>,
}

impl Tables {
    fn next_id(len: usize) -> i32 {
        i32::try_from(len + 1).unwrap_or(i32::MAX)
    }
}

/// In-memory survey store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all users, in id order.
    pub fn users(&self) -> Vec<UserRow> {
        self.lock().users.clone()
    }

    /// Snapshot of one user's scores, in id order.
    pub fn scores_for(&self, user_id: i32) -> Vec<UserScoreRow> {
        self.lock()
            .user_scores
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Snapshot of all feedback, in id order.
    pub fn feedbacks(&self) -> Vec<FeedbackRow> {
        self.lock().feedbacks.clone()
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn record_submission(
        &self,
        submission: &Submission,
    ) -> Result<SubmissionReceipt, DbError> {
        let identity = &submission.identity;
        let mut tables = self.lock();

        let found = tables.users.iter_mut().find(|user| {
            user.name == identity.name.as_str()
                && user.degree == identity.degree.as_str()
                && user.topic == identity.topic.as_str()
        });

        let (user_id, created) = match found {
            Some(user) => {
                user.total_score = identity.total_score.value();
                (user.id, false)
            }
            None => {
                let id = Tables::next_id(tables.users.len());
                tables.users.push(UserRow {
                    id,
                    name: identity.name.as_str().to_owned(),
                    degree: identity.degree.as_str().to_owned(),
                    topic: identity.topic.as_str().to_owned(),
                    total_score: identity.total_score.value(),
                });
                (id, true)
            }
        };

        let existing: HashMap<String, i32> = tables
            .user_scores
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| (row.dimension_name.clone(), row.id))
            .collect();
        let plan = plan_score_changes(&existing, &submission.scores);

        for change in &plan {
            match *change {
                ScoreChange::Update { id, score } => {
                    if let Some(row) = tables.user_scores.iter_mut().find(|row| row.id == id) {
                        row.score = score.value();
                    }
                }
                ScoreChange::Insert {
                    dimension_name,
                    score,
                } => {
                    let id = Tables::next_id(tables.user_scores.len());
                    tables.user_scores.push(UserScoreRow {
                        id,
                        user_id,
                        dimension_name: dimension_name.to_owned(),
                        score: score.value(),
                    });
                }
            }
        }

        let (scores_inserted, scores_updated) = tally(&plan);
        Ok(SubmissionReceipt {
            user_id,
            created,
            scores_inserted,
            scores_updated,
        })
    }

    async fn record_feedback(&self, entry: &FeedbackEntry) -> Result<i32, DbError> {
        let mut tables = self.lock();
        let id = Tables::next_id(tables.feedbacks.len());
        tables.feedbacks.push(FeedbackRow {
            id,
            selected_text: entry.selected_text.as_str().to_owned(),
            feedback: entry.feedback.as_str().to_owned(),
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DimensionScore, Identity};

    fn submission(name: &str, total: f64, scores: &[(&str, f64)]) -> Submission {
        Submission {
            identity: Identity::new(name, "PhD", "NLP", total).unwrap(),
            scores: scores
                .iter()
                .map(|(dim, score)| DimensionScore::new(dim, *score).unwrap())
                .collect(),
        }
    }

    #[tokio::test]
    async fn first_submission_creates_user_and_scores() {
        let store = MemoryStore::new();
        let receipt = store
            .record_submission(&submission("Alice", 85.0, &[("clarity", 9.0)]))
            .await
            .unwrap();

        assert_eq!(
            receipt,
            SubmissionReceipt {
                user_id: 1,
                created: true,
                scores_inserted: 1,
                scores_updated: 0,
            }
        );
        assert_eq!(store.users()[0].total_score, 85);
        assert_eq!(
            store.scores_for(1),
            vec![UserScoreRow {
                id: 1,
                user_id: 1,
                dimension_name: "clarity".into(),
                score: 9,
            }]
        );
    }

    #[tokio::test]
    async fn same_payload_twice_is_idempotent() {
        let store = MemoryStore::new();
        let sub = submission("Alice", 85.0, &[("clarity", 9.0), ("depth", 6.0)]);

        store.record_submission(&sub).await.unwrap();
        let users_once = store.users();
        let scores_once = store.scores_for(1);

        let receipt = store.record_submission(&sub).await.unwrap();
        assert!(!receipt.created);
        assert_eq!(receipt.scores_updated, 2);
        assert_eq!(store.users(), users_once);
        assert_eq!(store.scores_for(1), scores_once);
    }

    #[tokio::test]
    async fn new_dimension_adds_exactly_one_row() {
        let store = MemoryStore::new();
        store
            .record_submission(&submission("Alice", 85.0, &[("clarity", 9.0)]))
            .await
            .unwrap();
        store
            .record_submission(&submission("Alice", 85.0, &[("novelty", 4.0)]))
            .await
            .unwrap();

        let scores = store.scores_for(1);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].dimension_name, "clarity");
        assert_eq!(scores[0].score, 9);
        assert_eq!(scores[1].dimension_name, "novelty");
    }

    #[tokio::test]
    async fn different_natural_keys_get_different_users() {
        let store = MemoryStore::new();
        let a = store
            .record_submission(&submission("Alice", 1.0, &[]))
            .await
            .unwrap();
        let b = store
            .record_submission(&submission("Bob", 1.0, &[]))
            .await
            .unwrap();

        assert_ne!(a.user_id, b.user_id);
        assert_eq!(store.users().len(), 2);
    }

    #[tokio::test]
    async fn feedback_ids_are_distinct_for_duplicates() {
        let store = MemoryStore::new();
        let entry = FeedbackEntry::new("x", "y").unwrap();

        let first = store.record_feedback(&entry).await.unwrap();
        let second = store.record_feedback(&entry).await.unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(store.feedbacks().len(), 2);
    }
}
