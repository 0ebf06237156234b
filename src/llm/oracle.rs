//! Text-completion oracle client.
//!
//! The gateway treats the language model as an opaque function from prompt
//! text to response text. `LlmClient` is the production implementation and
//! is built once per process from `LlmConfig`.

use crate::config::LlmConfig;
use crate::otel::{llm_span, record_llm_response, LlmOperation};
use crate::types::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, Instrument};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Opaque prompt-in, text-out completion service.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    /// Complete a single prompt.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::LlmError` if the call fails
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logs and health output.
    fn model(&self) -> &str;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    /// Infer provider from model name.
    ///
    /// - `gemini-*` → Gemini
    /// - `claude-*` / `anthropic*` → Anthropic
    /// - anything else → OpenAI-compatible
    pub fn from_model(model: &str) -> Self {
        if model.starts_with("gemini") || model.starts_with("models/gemini") {
            Self::Gemini
        } else if model.starts_with("claude") || model.starts_with("anthropic") {
            Self::Anthropic
        } else {
            Self::OpenAI
        }
    }

    /// Provider name as used in `gen_ai.system`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => GEMINI_BASE_URL,
            Self::OpenAI => OPENAI_BASE_URL,
            Self::Anthropic => ANTHROPIC_BASE_URL,
        }
    }
}

/// Gemini `generateContent` response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

/// OpenAI chat completion response.
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Anthropic messages response.
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: String,
}

/// HTTP client for the configured LLM provider.
pub struct LlmClient {
    api_key: String,
    model: String,
    provider: LlmProvider,
    base_url: String,
    client: Client,
}

impl LlmClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::ConfigError` if the API key is empty or the
    /// HTTP client cannot be built
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::ConfigError("LLM API key is empty".to_string()));
        }

        let provider = LlmProvider::from_model(&config.model);
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| provider.default_base_url().to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Provider selected from the model name.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    async fn call_gemini(&self, prompt: &str) -> Result<String> {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        let response = self.client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [
                    {"role": "user", "parts": [{"text": prompt}]}
                ]
            }))
            .send()
            .await
            .map_err(|e| GatewayError::llm(format!("Gemini API error: {}", e)))?;

        let body = Self::read_body(response, "Gemini").await?;

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::llm(format!("Failed to parse Gemini response: {}", e)))?;

        let content = parsed.candidates.into_iter().next()
            .and_then(|c| c.content)
            .ok_or_else(|| GatewayError::llm("No candidates from Gemini"))?;

        Ok(content.parts.into_iter().map(|p| p.text).collect::<String>())
    }

    async fn call_openai(&self, prompt: &str) -> Result<String> {
        let response = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": 0.1
            }))
            .send()
            .await
            .map_err(|e| GatewayError::llm(format!("OpenAI API error: {}", e)))?;

        let body = Self::read_body(response, "OpenAI").await?;

        let parsed: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::llm(format!("Failed to parse OpenAI response: {}", e)))?;

        Ok(parsed.choices.into_iter().next()
            .ok_or_else(|| GatewayError::llm("No response from OpenAI"))?
            .message.content.unwrap_or_default())
    }

    async fn call_anthropic(&self, prompt: &str) -> Result<String> {
        let response = self.client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.model,
                "max_tokens": 1024,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": 0.1
            }))
            .send()
            .await
            .map_err(|e| GatewayError::llm(format!("Anthropic API error: {}", e)))?;

        let body = Self::read_body(response, "Anthropic").await?;

        let parsed: AnthropicResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::llm(format!("Failed to parse Anthropic response: {}", e)))?;

        Ok(parsed.content.into_iter().next()
            .ok_or_else(|| GatewayError::llm("No response from Anthropic"))?
            .text)
    }

    /// Read a response body, turning non-success statuses into errors.
    async fn read_body(response: reqwest::Response, provider: &str) -> Result<String> {
        let status = response.status();
        let body = response.text().await
            .map_err(|e| GatewayError::llm(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(GatewayError::llm(format!("{} API error {}: {}", provider, status, body)));
        }

        Ok(body)
    }
}

#[async_trait]
impl CompletionOracle for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let operation = match self.provider {
            LlmProvider::Gemini => LlmOperation::GenerateContent,
            LlmProvider::OpenAI | LlmProvider::Anthropic => LlmOperation::Chat,
        };
        let span = llm_span(operation, self.provider.as_str(), &self.model);

        async {
            let text = match self.provider {
                LlmProvider::Gemini => self.call_gemini(prompt).await?,
                LlmProvider::OpenAI => self.call_openai(prompt).await?,
                LlmProvider::Anthropic => self.call_anthropic(prompt).await?,
            };
            record_llm_response(text.len());
            debug!(chars = text.len(), "oracle responded");
            Ok::<_, GatewayError>(text)
        }
        .instrument(span)
        .await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: &str, api_key: &str) -> LlmConfig {
        LlmConfig {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: None,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_provider_from_model() {
        assert_eq!(LlmProvider::from_model("gemini-2.5-flash-lite"), LlmProvider::Gemini);
        assert_eq!(LlmProvider::from_model("models/gemini-2.5-flash"), LlmProvider::Gemini);
        assert_eq!(LlmProvider::from_model("claude-haiku-4-5"), LlmProvider::Anthropic);
        assert_eq!(LlmProvider::from_model("gpt-4.1"), LlmProvider::OpenAI);
    }

    #[test]
    fn test_client_requires_api_key() {
        let err = LlmClient::new(&config("gemini-2.5-flash-lite", "  ")).err();
        assert!(matches!(err, Some(GatewayError::ConfigError(_))));
    }

    #[test]
    fn test_client_base_url() {
        let client = LlmClient::new(&config("gemini-2.5-flash-lite", "key")).unwrap();
        assert_eq!(client.provider(), LlmProvider::Gemini);
        assert_eq!(client.base_url, GEMINI_BASE_URL);
        assert_eq!(client.model(), "gemini-2.5-flash-lite");

        let mut cfg = config("gpt-4.1", "key");
        cfg.base_url = Some("http://localhost:9999/v1/".to_string());
        let client = LlmClient::new(&cfg).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_gemini_response_parsing() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"SELECT 1"},{"text":";"}]}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(body).unwrap();
        let text: String = parsed.candidates[0].content.as_ref().unwrap()
            .parts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(text, "SELECT 1;");

        let parsed: GeminiResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_llm_error() {
        let mut cfg = config("gemini-2.5-flash-lite", "key");
        cfg.base_url = Some("http://127.0.0.1:9".to_string());
        let client = LlmClient::new(&cfg).unwrap();

        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, GatewayError::LlmError(_)));
    }
}
