//! Error types for the evaluation pipeline.
//!
//! `ProviderError` lives here rather than in `delf-providers` so the adapter
//! can apply deadlines and cancellation without depending on a concrete
//! backend. Everything the orchestrator returns is an [`EvaluationFailed`].

use std::fmt;

use thiserror::Error;

/// Errors that can occur when interacting with a generative-text backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
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

    /// The backend answered but carried no text content.
    #[error("backend returned no text content")]
    EmptyResponse,

    /// The caller cancelled the call before it completed.
    #[error("call cancelled by caller")]
    Cancelled,
}

/// A single failure inside the evaluation pipeline.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Transport, auth, deadline or empty-response failure from the backend.
    #[error("provider call failed: {0}")]
    ProviderCallFailed(#[from] ProviderError),

    /// The sanitized text contains no parseable JSON object.
    #[error("no structured result found in model response: {preview:?}")]
    NoStructuredResultFound { preview: String },

    /// Parseable JSON whose shape does not match the expected result.
    #[error("model response does not match the {schema} schema: {reason}")]
    SchemaMismatch { schema: &'static str, reason: String },

    /// The reported score violates `0 <= score <= max_score`.
    #[error("score {score} is outside 0..={max_score}")]
    ScoreOutOfRange { score: f64, max_score: f64 },

    /// The request lacks a field required by its exercise type.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Pipeline stage in which an evaluation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Dispatching,
    Calling,
    Sanitizing,
    Parsing,
    Validating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Dispatching => write!(f, "dispatching"),
            Stage::Calling => write!(f, "calling"),
            Stage::Sanitizing => write!(f, "sanitizing"),
            Stage::Parsing => write!(f, "parsing"),
            Stage::Validating => write!(f, "validating"),
        }
    }
}

/// The only error the orchestrator hands back to callers.
#[derive(Debug, Error)]
#[error("evaluation failed while {stage}: {source}")]
pub struct EvaluationFailed {
    pub stage: Stage,
    #[source]
    pub source: EvaluationError,
}

impl EvaluationFailed {
    pub fn new(stage: Stage, source: impl Into<EvaluationError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// The backend error, if the failure came from the network call.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match &self.source {
            EvaluationError::ProviderCallFailed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_names_stage() {
        let err = EvaluationFailed::new(Stage::Calling, ProviderError::Timeout(30));
        let msg = err.to_string();
        assert!(msg.contains("calling"), "got: {msg}");
        assert!(msg.contains("timed out after 30s"), "got: {msg}");
        assert!(matches!(err.provider_error(), Some(ProviderError::Timeout(30))));
    }
}
