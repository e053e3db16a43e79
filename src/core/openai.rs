//! Client for chat-completion APIs using bearer-token auth.
//!
//! The same request/response shape is spoken by OpenAI-compatible
//! self-hosted servers, so the wire helpers here are shared with
//! [`super::self_hosted`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::backend::{Backend, BackendError, HOSTED_TIMEOUT, http_client};

/// Model used when the configuration leaves it blank.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// One chat turn.
#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub(crate) const fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Posts a single-turn chat completion and returns the first choice's text.
pub(crate) async fn post_chat_completion(
    http: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
    model: &str,
    prompt: &str,
    backend_name: &str,
) -> Result<String, BackendError> {
    let body = ChatCompletionRequest {
        model,
        messages: [ChatMessage::user(prompt)],
    };

    tracing::debug!(backend = backend_name, %url, model, "sending chat completion");

    let mut request = http.post(url).json(&body);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }
    let response = request.send().await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(BackendError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    let parsed: ChatCompletionResponse =
        serde_json::from_str(&text).map_err(|e| BackendError::Malformed(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| BackendError::EmptyResponse(backend_name.to_string()))
}

/// Hosted chat-completion client.
pub struct OpenAiClient {
    name: String,
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiClient {
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

    /// Full completion endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl Backend for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        post_chat_completion(
            &self.http,
            &self.endpoint(),
            Some(&self.api_key),
            &self.model,
            prompt,
            &self.name,
        )
        .await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
