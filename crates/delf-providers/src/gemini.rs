//! Google Gemini `generateContent` backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use delf_core::error::ProviderError;
use delf_core::traits::{GenerateRequest, GenerateResponse, LlmProvider};

use crate::http::{classify_send_error, error_for_status};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Gemini API provider.
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: &str, base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            client: crate::http::client(timeout),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate's parts.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        let start = Instant::now();

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            request.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.timeout))?;

        let response = error_for_status(response, &request.model, |body| {
            serde_json::from_str::<GeminiError>(body)
                .ok()
                .map(|e| e.error.message)
        })
        .await?;

        let api_response: GeminiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let content = api_response
            .into_text()
            .ok_or(ProviderError::EmptyResponse)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(latency_ms, "gemini replied");

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-pro:generateContent";

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: DEFAULT_MODEL.into(),
            prompt: prompt.into(),
            max_tokens: 1000,
            temperature: 0.0,
        }
    }

    fn provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new("gem-key", Some(server.uri()), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn successful_generation_joins_parts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "gem-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "Traduisez"}]}],
                "generationConfig": {"maxOutputTokens": 1000}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "{\"score\":"}, {"text": " 18}"}]},
                    "finishReason": "STOP"
                }]
            })))
            .mount(&server)
            .await;

        let response = provider(&server)
            .generate(&request("Traduisez"))
            .await
            .unwrap();
        assert_eq!(response.content, "{\"score\": 18}");
        assert_eq!(response.model, "gemini-pro");
    }

    #[tokio::test]
    async fn missing_candidates_is_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).generate(&request("x")).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[tokio::test]
    async fn forbidden_is_authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).generate(&request("x")).await.unwrap_err();
        match err {
            ProviderError::AuthenticationFailed(message) => {
                assert_eq!(message, "API key not valid")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn rate_limiting_without_header_uses_default() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = provider(&server).generate(&request("x")).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::RateLimited {
                retry_after_ms: 5000
            }
        ));
    }

    #[tokio::test]
    async fn unknown_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-nope:generateContent"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut req = request("x");
        req.model = "gemini-nope".into();
        let err = provider(&server).generate(&req).await.unwrap_err();
        assert!(matches!(err, ProviderError::ModelNotFound(m) if m == "gemini-nope"));
    }
}
