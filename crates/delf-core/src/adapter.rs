//! Provider adapter: one interface over every backend.
//!
//! Prompts come from [`crate::prompt`], so the only thing that differs
//! between backends is the [`LlmProvider`] transport plugged in here. Every
//! call runs under the configured deadline and can be cancelled by the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::instrument;

use crate::cancel::CancelSignal;
use crate::error::ProviderError;
use crate::model::EvaluationRequest;
use crate::prompt;
use crate::traits::{GenerateRequest, LlmProvider};

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Per-deployment settings applied to every backend call.
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    /// Model identifier passed to the backend.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Deadline for a single backend call.
    pub timeout: Duration,
    pub translation_max_tokens: u32,
    pub evaluation_max_tokens: u32,
    pub recommendation_max_tokens: u32,
}

impl AdapterSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            temperature: 0.0,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            translation_max_tokens: 1000,
            evaluation_max_tokens: 2000,
            recommendation_max_tokens: 1500,
        }
    }
}

/// A translation job. Defaults to French → Ukrainian.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source: String,
    pub target: String,
    pub context: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: "fr".to_string(),
            target: "uk".to_string(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Builds prompts, calls the backend and returns its raw text.
pub struct ProviderAdapter {
    provider: Arc<dyn LlmProvider>,
    settings: AdapterSettings,
}

impl ProviderAdapter {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: AdapterSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn settings(&self) -> &AdapterSettings {
        &self.settings
    }

    /// Translate text; the reply is returned as plain text, trimmed.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
        cancel: &CancelSignal,
    ) -> Result<String, ProviderError> {
        let prompt = prompt::translation_prompt(
            &request.text,
            &request.source,
            &request.target,
            request.context.as_deref(),
        );
        let text = self
            .call(prompt, self.settings.translation_max_tokens, cancel)
            .await?;
        Ok(text.trim().to_string())
    }

    pub async fn evaluate_writing(
        &self,
        request: &EvaluationRequest,
        cancel: &CancelSignal,
    ) -> Result<String, ProviderError> {
        let prompt = prompt::written_production_prompt(request);
        self.call(prompt, self.settings.evaluation_max_tokens, cancel)
            .await
    }

    pub async fn evaluate_comprehension(
        &self,
        request: &EvaluationRequest,
        cancel: &CancelSignal,
    ) -> Result<String, ProviderError> {
        let prompt = prompt::comprehension_prompt(request);
        self.call(prompt, self.settings.evaluation_max_tokens, cancel)
            .await
    }

    pub async fn generate_recommendations(
        &self,
        user_stats: &Value,
        progress_data: &Value,
        cancel: &CancelSignal,
    ) -> Result<String, ProviderError> {
        let prompt = prompt::recommendations_prompt(user_stats, progress_data);
        self.call(prompt, self.settings.recommendation_max_tokens, cancel)
            .await
    }

    #[instrument(skip_all, fields(provider = %self.provider.name(), model = %self.settings.model))]
    async fn call(
        &self,
        prompt: String,
        max_tokens: u32,
        cancel: &CancelSignal,
    ) -> Result<String, ProviderError> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let request = GenerateRequest {
            model: self.settings.model.clone(),
            prompt,
            max_tokens,
            temperature: self.settings.temperature,
        };
        let start = Instant::now();
        let deadline = self.settings.timeout;

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("backend call cancelled after {}ms", start.elapsed().as_millis());
                return Err(ProviderError::Cancelled);
            }
            outcome = tokio::time::timeout(deadline, self.provider.generate(&request)) => {
                outcome.map_err(|_| ProviderError::Timeout(deadline.as_secs()))??
            }
        };

        tracing::debug!(
            latency_ms = response.latency_ms,
            chars = response.content.len(),
            "backend replied"
        );

        if response.content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(response.content)
    }
}
