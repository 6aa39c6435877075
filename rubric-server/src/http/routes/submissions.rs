//! Score submission endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::{DimensionScore, Identity, Submission, ValidationError};

/// Identity block of a submission
#[derive(Debug, Deserialize)]
pub struct UserDataPayload {
    pub name: String,
    pub degree: String,
    pub topic: String,
    pub total_score: f64,
}

/// One dimension of a submission
#[derive(Debug, Deserialize)]
pub struct UserScorePayload {
    pub dimension_name: String,
    pub score: f64,
}

/// POST /api/postUserData request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUserDataRequest {
    pub user_data: UserDataPayload,
    pub user_scores: Vec<UserScorePayload>,
}

impl TryFrom<PostUserDataRequest> for Submission {
    type Error = ValidationError;

    fn try_from(req: PostUserDataRequest) -> Result<Self, Self::Error> {
        let data = req.user_data;
        let identity = Identity::new(&data.name, &data.degree, &data.topic, data.total_score)?;
        let scores = req
            .user_scores
            .iter()
            .map(|s| DimensionScore::new(&s.dimension_name, s.score))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Submission { identity, scores })
    }
}

/// POST /api/postUserData response body
#[derive(Debug, Serialize)]
pub struct PostUserDataResponse {
    pub message: &'static str,
    pub user_id: i32,
}

/// POST /api/postUserData - upsert a user and its dimension scores
async fn post_user_data(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<PostUserDataRequest>,
) -> Result<Json<PostUserDataResponse>, ApiError> {
    let submission = Submission::try_from(req)?;
    let receipt = state.store.record_submission(&submission).await?;

    tracing::info!(
        user_id = receipt.user_id,
        created = receipt.created,
        scores_inserted = receipt.scores_inserted,
        scores_updated = receipt.scores_updated,
        "Submission stored"
    );

    Ok(Json(PostUserDataResponse {
        message: "Data successfully stored",
        user_id: receipt.user_id,
    }))
}

/// Submission routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/postUserData", post(post_user_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> PostUserDataRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn converts_wire_payload() {
        let req = request(serde_json::json!({
            "userData": {"name": "Alice", "degree": "PhD", "topic": "NLP", "total_score": 85.5},
            "userScores": [{"dimension_name": "clarity", "score": 9}]
        }));

        let submission = Submission::try_from(req).unwrap();
        assert_eq!(submission.identity.name.as_str(), "Alice");
        assert_eq!(submission.identity.total_score.value(), 85);
        assert_eq!(submission.scores.len(), 1);
        assert_eq!(submission.scores[0].score.value(), 9);
    }

    #[test]
    fn first_invalid_score_is_reported() {
        let req = request(serde_json::json!({
            "userData": {"name": "Alice", "degree": "PhD", "topic": "NLP", "total_score": 1},
            "userScores": [
                {"dimension_name": "clarity", "score": 9},
                {"dimension_name": "depth", "score": f64::MAX},
                {"dimension_name": "", "score": f64::MIN}
            ]
        }));

        let err = Submission::try_from(req).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange { field: "score", value: f64::MAX }
        );
    }

    #[test]
    fn user_scores_are_required() {
        let result: Result<PostUserDataRequest, _> = serde_json::from_value(serde_json::json!({
            "userData": {"name": "Alice", "degree": "PhD", "topic": "NLP", "total_score": 1}
        }));
        assert!(result.is_err());
    }
}
