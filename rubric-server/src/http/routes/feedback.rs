//! Feedback endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::FeedbackEntry;

/// POST /api/submitFeedback request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub selected_text: String,
    pub feedback: String,
}

/// POST /api/submitFeedback response body
#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    pub message: &'static str,
    pub feedback_id: i32,
}

/// POST /api/submitFeedback - append a feedback snippet
async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SubmitFeedbackRequest>,
) -> Result<Json<SubmitFeedbackResponse>, ApiError> {
    let entry = FeedbackEntry::new(&req.selected_text, &req.feedback)?;
    let feedback_id = state.store.record_feedback(&entry).await?;

    tracing::info!(feedback_id, "Feedback stored");

    Ok(Json(SubmitFeedbackResponse {
        message: "Feedback stored successfully",
        feedback_id,
    }))
}

/// Feedback routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/submitFeedback", post(submit_feedback))
}
