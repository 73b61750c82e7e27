//! Mock provider for testing without API calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use delf_core::error::ProviderError;
use delf_core::traits::{GenerateRequest, GenerateResponse, LlmProvider};

/// A mock LLM provider that returns canned replies.
///
/// Replies are picked by the first key that appears in the prompt, falling
/// back to the default reply.
pub struct MockProvider {
    responses: HashMap<String, String>,
    default_response: Option<String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockProvider {
    /// Create a mock with prompt-keyed replies and no default.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same reply.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: Some(response.to_string()),
            ..Self::new(HashMap::new())
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        let content = self
            .responses
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .or_else(|| self.default_response.clone())
            .ok_or(ProviderError::EmptyResponse)?;

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            latency_ms: 1,
        })
    }
}
