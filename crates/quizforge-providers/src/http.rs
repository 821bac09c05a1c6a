//! HTTP plumbing shared by the provider clients.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};

use crate::error::ProviderError;

/// Seconds to wait when a 429 carries no usable `retry-after`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

/// Classify a transport-level failure.
pub(crate) fn send_error(e: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::NetworkError(e.to_string())
    }
}

/// Map non-success statuses to [`ProviderError`], passing 2xx/3xx through.
///
/// `extract_message` pulls a readable message out of a provider-specific
/// error body; the raw body is used when it returns `None`.
pub(crate) async fn check_status(
    response: Response,
    model: &str,
    extract_message: fn(&str) -> Option<String>,
) -> Result<Response, ProviderError> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }

    if status == 429 {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
            * 1000;
        return Err(ProviderError::RateLimited {
            retry_after_ms: retry_after,
        });
    }
    if status == 404 {
        return Err(ProviderError::ModelNotFound(model.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or(body);
    match status {
        401 | 403 => Err(ProviderError::AuthenticationFailed(message)),
        _ => Err(ProviderError::ApiError { status, message }),
    }
}

/// Read a JSON success body, reporting decode failures as API errors.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, ProviderError> {
    response.json().await.map_err(|e| ProviderError::ApiError {
        status: 0,
        message: format!("failed to parse response: {e}"),
    })
}

/// Reject an API key that is missing after config resolution.
pub(crate) fn require_api_key(provider: &str, api_key: &str) -> Result<String> {
    let key = api_key.trim();
    if key.is_empty() {
        anyhow::bail!(
            "no API key configured for provider '{provider}'; set QUIZFORGE_{}_KEY or api_key in the config file",
            provider.to_uppercase()
        );
    }
    Ok(key.to_string())
}
