//! Transport helpers shared by the HTTP backends.

use std::time::Duration;

use delf_core::error::ProviderError;

/// Seconds to wait after a 429 that carries no usable `retry-after` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

pub(crate) fn client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
}

pub(crate) fn classify_send_error(err: reqwest::Error, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout.as_secs())
    } else {
        ProviderError::NetworkError(err.to_string())
    }
}

/// Map a non-success HTTP status to a [`ProviderError`], passing successful
/// responses through. `extract_message` pulls the human-readable message out
/// of the backend's error body when it has the expected shape.
pub(crate) async fn error_for_status<F>(
    response: reqwest::Response,
    model: &str,
    extract_message: F,
) -> Result<reqwest::Response, ProviderError>
where
    F: FnOnce(&str) -> Option<String>,
{
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
    if status == 401 || status == 403 {
        return Err(ProviderError::AuthenticationFailed(message));
    }
    Err(ProviderError::ApiError { status, message })
}
