//! Client for the Anthropic messages API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::backend::{Backend, BackendError, HOSTED_TIMEOUT, http_client};
use super::openai::ChatMessage;

/// Model used when the configuration leaves it blank.
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value.
const API_VERSION: &str = "2023-06-01";

const MAX_TOKENS: u32 = 4096;

/// Model identifiers suggested when the provider rejects a model name.
pub const KNOWN_MODELS: &[&str] = &[
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: String,
}

/// Hosted messages-API client.
pub struct AnthropicClient {
    name: String,
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl AnthropicClient {
    /// Creates a client against the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(name: &str, api_key: &str, model: &str) -> Result<Self, BackendError> {
        Ok(Self {
            name: name.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: http_client(HOSTED_TIMEOUT)?,
        })
    }

    /// Points the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Full messages endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    /// Maps an error payload to a typed error.
    ///
    /// A `not_found_error` that mentions the model becomes
    /// [`BackendError::ModelNotFound`] so the user sees valid model names
    /// instead of the raw payload.
    fn classify_error(&self, status: u16, body: String) -> BackendError {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            let detail = envelope.error;
            if detail.kind == "not_found_error" && detail.message.contains("model") {
                return BackendError::ModelNotFound {
                    model: self.model.clone(),
                    known: KNOWN_MODELS,
                };
            }
        }
        BackendError::Status { status, body }
    }
}

#[async_trait]
impl Backend for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let url = self.endpoint();
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [ChatMessage::user(prompt)],
        };

        tracing::debug!(backend = %self.name, %url, model = %self.model, "sending messages request");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(self.classify_error(status.as_u16(), text));
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&text).map_err(|e| BackendError::Malformed(e.to_string()))?;

        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| BackendError::EmptyResponse(self.name.clone()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, model: &str) -> AnthropicClient {
        AnthropicClient::new("anthropic", "ak-test", model)
            .unwrap()
            .with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn sends_auth_headers_and_returns_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "ak-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": DEFAULT_MODEL,
                "max_tokens": 4096,
                "messages": [{"role": "user", "content": "summarize"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {"type": "tool_use", "id": "t1"},
                    {"type": "text", "text": "Summary"}
                ]
            })))
            .mount(&server)
            .await;

        let text = client(&server, DEFAULT_MODEL)
            .generate("summarize")
            .await
            .unwrap();
        assert_eq!(text, "Summary");
    }

    #[tokio::test]
    async fn no_text_block_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let err = client(&server, DEFAULT_MODEL)
            .generate("x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "anthropic returned no text content");
    }

    #[tokio::test]
    async fn model_not_found_is_rewritten_with_known_models() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "type": "error",
                "error": {"type": "not_found_error", "message": "model: claude-2.5-ultra"}
            })))
            .mount(&server)
            .await;

        let err = client(&server, "claude-2.5-ultra")
            .generate("x")
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Model 'claude-2.5-ultra' not found."));
        for known in KNOWN_MODELS {
            assert!(message.contains(known), "missing {known}");
        }
        assert!(!message.contains("not_found_error"));
    }

    #[tokio::test]
    async fn other_errors_keep_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .mount(&server)
            .await;

        let err = client(&server, DEFAULT_MODEL)
            .generate("x")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 529, .. }));
    }
}
