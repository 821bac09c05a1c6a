//! Error handling for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use quizforge_core::{GenerationError, WizardError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The provider call failed. The cause is logged, not returned.
    #[error("Failed to generate MCQs")]
    Generation(#[source] GenerationError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::InvalidRequest(message) => ApiError::BadRequest(message),
            failed => ApiError::Generation(failed),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) | ApiError::Wizard(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(e) => {
                tracing::error!("MCQ generation failed: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(e) => {
                tracing::error!("request failed: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_status() {
        let response = ApiError::BadRequest("topic is empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn wizard_errors_are_bad_requests() {
        let response = ApiError::from(WizardError::MissingClassId).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_generation_request_maps_to_bad_request() {
        let err = ApiError::from(GenerationError::InvalidRequest("topic is empty".into()));
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.to_string(), "topic is empty");
    }

    #[test]
    fn failed_generation_hides_cause() {
        let err = ApiError::from(GenerationError::Failed(anyhow::anyhow!(
            "network error: connection refused"
        )));
        assert_eq!(err.to_string(), "Failed to generate MCQs");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
