//! Error types shared across quizforge crates.
//!
//! `ProviderError` lives here rather than in `quizforge-providers` so the
//! generator can downcast and classify failures without string matching.

use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (missing or invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if retrying the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

/// Failure of a whole generation request.
///
/// A response that parses to zero questions is *not* an error; see
/// [`GenerationOutcome::is_empty`](crate::generator::GenerationOutcome::is_empty).
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request was rejected before reaching the provider.
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    /// The provider call failed.
    #[error("generation failed: {0:#}")]
    Failed(anyhow::Error),
}

impl GenerationError {
    /// The underlying provider error, if the failure carried one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            GenerationError::Failed(e) => e.downcast_ref::<ProviderError>(),
            GenerationError::InvalidRequest(_) => None,
        }
    }

    /// Whether the caller may reasonably retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::InvalidRequest(_) => false,
            GenerationError::Failed(_) => !self.provider_error().is_some_and(|e| e.is_permanent()),
        }
    }
}

/// Errors from the select → review → configure flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("select at least one question before proceeding")]
    NoQuestionsSelected,

    #[error("question {index} is out of range (1..={len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("please select a class ID")]
    MissingClassId,

    #[error("unknown class ID '{class_id}', expected one of: {allowed}")]
    UnknownClass { class_id: String, allowed: String },

    #[error("total time must be at least one minute")]
    InvalidTotalTime,

    /// `index` is 1-based.
    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_provider_errors() {
        assert!(ProviderError::AuthenticationFailed("bad".into()).is_permanent());
        assert!(ProviderError::ModelNotFound("x".into()).is_permanent());
        assert!(!ProviderError::Timeout(30).is_permanent());
        assert_eq!(
            ProviderError::RateLimited {
                retry_after_ms: 5000
            }
            .retry_after_ms(),
            Some(5000)
        );
    }

    #[test]
    fn generation_error_exposes_provider_error() {
        let err = GenerationError::Failed(ProviderError::NetworkError("reset".into()).into());
        assert!(matches!(
            err.provider_error(),
            Some(ProviderError::NetworkError(_))
        ));
        assert!(err.is_retryable());
        assert!(err.to_string().starts_with("generation failed"));
    }

    #[test]
    fn auth_failure_is_not_retryable() {
        let err =
            GenerationError::Failed(ProviderError::AuthenticationFailed("denied".into()).into());
        assert!(!err.is_retryable());
        assert!(!GenerationError::InvalidRequest("empty topic".into()).is_retryable());
    }
}
