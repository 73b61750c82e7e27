//! Transport trait for generative-text backends.
//!
//! Implemented by the `delf-providers` crate. A backend only moves a prompt
//! to the service and text back; prompt construction and result handling
//! live in [`crate::adapter`] and [`crate::evaluator`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Trait for LLM backends that turn a prompt into text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Send one prompt and return the generated text.
    ///
    /// Implementations return [`ProviderError::EmptyResponse`] when the
    /// service answers without any text content.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ProviderError>;
}

/// Request to generate text from an LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "claude-sonnet-4-20250514").
    pub model: String,
    /// The prompt, sent as a single user message.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response from an LLM generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The raw text content.
    pub content: String,
    /// Model that actually generated the response.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}
