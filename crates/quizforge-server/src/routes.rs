//! Route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use quizforge_core::generator::GenerationRequest;
use quizforge_core::test_paper::{SavedTest, TestPayload};
use quizforge_core::Mcq;

use crate::error::{ApiError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMcqsRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub num_mcqs: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateMcqsResponse {
    pub mcqs: Vec<Mcq>,
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// POST /api/generate-mcqs
pub async fn generate_mcqs(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateMcqsRequest>, JsonRejection>,
) -> Result<Json<GenerateMcqsResponse>> {
    let body = json_body(payload)?;
    if body.topic.trim().is_empty() {
        return Err(ApiError::BadRequest("Topic is required".into()));
    }

    let request = GenerationRequest::new(body.topic)
        .with_count(body.num_mcqs.unwrap_or(state.default_question_count));
    let outcome = state.generator.generate(&request).await?;

    tracing::info!(
        count = outcome.mcqs.len(),
        skipped = outcome.skipped_lines,
        latency_ms = outcome.latency_ms,
        "generated MCQs"
    );
    Ok(Json(GenerateMcqsResponse {
        mcqs: outcome.mcqs,
    }))
}

/// POST /api/tests
pub async fn create_test(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TestPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedTest>)> {
    let test = json_body(payload)?.normalized(&state.classes)?;

    let store = state.store.clone();
    let saved = tokio::task::spawn_blocking(move || store.save(test))
        .await
        .map_err(anyhow::Error::from)??;

    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/tests
pub async fn list_tests(State(state): State<AppState>) -> Result<Json<Vec<SavedTest>>> {
    let store = state.store.clone();
    let tests = tokio::task::spawn_blocking(move || store.list())
        .await
        .map_err(anyhow::Error::from)??;
    Ok(Json(tests))
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
