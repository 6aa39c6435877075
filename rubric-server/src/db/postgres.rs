//! PostgreSQL-backed store
//!
//! A submission runs in one transaction: user lookup (row-locked), insert or
//! total-score update, score load and reconciliation. Any error drops the
//! transaction, which rolls it back and returns the connection to the pool.

use async_trait::async_trait;
use sqlx::PgPool;

use super::reconcile::{plan_score_changes, tally, ScoreChange};
use super::repos::{FeedbackRepo, ScoreRepo, UserRepo};
use super::{schema, DbError, SurveyStore};
use crate::models::{FeedbackEntry, Submission, SubmissionReceipt};

/// Survey store over a PgPool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SurveyStore for PgStore {
    async fn ensure_schema(&self) -> Result<(), DbError> {
        schema::ensure(&self.pool).await
    }

    async fn record_submission(
        &self,
        submission: &Submission,
    ) -> Result<SubmissionReceipt, DbError> {
        let identity = &submission.identity;
        let mut tx = self.pool.begin().await?;

        let existing_user = UserRepo::new(&mut tx).find_for_update(identity).await?;
        let (user_id, created) = match existing_user {
            Some(id) => {
                UserRepo::new(&mut tx)
                    .set_total_score(id, identity.total_score)
                    .await?;
                (id, false)
            }
            None => (UserRepo::new(&mut tx).insert(identity).await?, true),
        };

        let existing_scores = ScoreRepo::new(&mut tx).ids_by_dimension(user_id).await?;
        let plan = plan_score_changes(&existing_scores, &submission.scores);

        let mut scores = ScoreRepo::new(&mut tx);
        for change in &plan {
            match *change {
                ScoreChange::Update { id, score } => scores.set_score(id, score).await?,
                ScoreChange::Insert {
                    dimension_name,
                    score,
                } => {
                    scores.insert(user_id, dimension_name, score).await?;
                }
            }
        }

        tx.commit().await?;

        let (scores_inserted, scores_updated) = tally(&plan);
        Ok(SubmissionReceipt {
            user_id,
            created,
            scores_inserted,
            scores_updated,
        })
    }

    async fn record_feedback(&self, entry: &FeedbackEntry) -> Result<i32, DbError> {
        FeedbackRepo::new(&self.pool).create(entry).await
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;
    use crate::models::{DimensionScore, Identity};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p rubric-server -- --ignored
    //
    // Each test uses a unique topic so runs don't see each other's rows.

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url, 5).await.expect("pool creation failed");
        let store = PgStore::new(pool);
        store.ensure_schema().await.expect("schema");
        store
    }

    fn unique_topic(prefix: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    fn submission(topic: &str, total: f64, scores: &[(&str, f64)]) -> Submission {
        Submission {
            identity: Identity::new("Alice", "PhD", topic, total).unwrap(),
            scores: scores
                .iter()
                .map(|(name, score)| DimensionScore::new(name, *score).unwrap())
                .collect(),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn resubmission_overwrites_without_new_rows() {
        let store = store().await;
        let topic = unique_topic("overwrite");

        let first = store
            .record_submission(&submission(&topic, 85.0, &[("clarity", 9.0)]))
            .await
            .unwrap();
        assert!(first.created);

        let second = store
            .record_submission(&submission(&topic, 90.0, &[("clarity", 10.0)]))
            .await
            .unwrap();
        assert_eq!(second.user_id, first.user_id);
        assert!(!second.created);

        let mut conn = store.pool().acquire().await.unwrap();
        let user = UserRepo::new(&mut conn).get(first.user_id).await.unwrap().unwrap();
        assert_eq!(user.total_score, 90);

        let scores = ScoreRepo::new(&mut conn).list_for_user(first.user_id).await.unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 10);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_first_submissions_never_duplicate_user() {
        let store = store().await;
        let topic = unique_topic("race");

        let handles: Vec<_> = (0..8_i32)
            .map(|i| {
                let store = store.clone();
                let sub = submission(&topic, f64::from(i), &[("clarity", 1.0)]);
                tokio::spawn(async move { store.record_submission(&sub).await })
            })
            .collect();

        for handle in handles {
            match handle.await.expect("task panicked") {
                Ok(_) | Err(DbError::Conflict(_)) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE topic = $1")
                .bind(&topic)
                .fetch_one(store.pool())
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn feedback_is_never_deduplicated() {
        let store = store().await;
        let entry = FeedbackEntry::new("x", "y").unwrap();

        let a = store.record_feedback(&entry).await.unwrap();
        let b = store.record_feedback(&entry).await.unwrap();
        assert_ne!(a, b);

        let row = FeedbackRepo::new(store.pool()).get(b).await.unwrap().unwrap();
        assert_eq!(row.selected_text, "x");
        assert_eq!(row.feedback, "y");
    }
}
