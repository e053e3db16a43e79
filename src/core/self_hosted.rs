//! Client for self-hosted model servers.
//!
//! Two wire dialects are supported: the Ollama-native `/api/chat` endpoint
//! and the OpenAI-compatible `/v1/chat/completions` shape served by most
//! other runtimes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::backend::{Backend, BackendError, http_client};
use super::openai::{ChatMessage, post_chat_completion};

/// Model used when the configuration leaves it blank.
pub const DEFAULT_MODEL: &str = "llama3";

/// Address of a local Ollama install.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Request timeout for self-hosted servers.
pub const SELF_HOSTED_TIMEOUT: Duration = Duration::from_secs(120);

const NATIVE_PATH: &str = "/api/chat";

/// Host/port pairs that identify a default Ollama install.
const NATIVE_HOST_MARKERS: [&str; 2] = ["localhost:11434", "127.0.0.1:11434"];

/// Request shape spoken by a self-hosted server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireDialect {
    /// Guess from the base URL.
    #[default]
    Auto,
    /// Ollama `/api/chat`.
    Native,
    /// `/v1/chat/completions`.
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
}

impl WireDialect {
    /// Returns the display name for the dialect.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Native => "Native",
            Self::OpenAiCompatible => "OpenAI-compatible",
        }
    }

    /// Returns the next dialect in the cycle.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Auto => Self::Native,
            Self::Native => Self::OpenAiCompatible,
            Self::OpenAiCompatible => Self::Auto,
        }
    }

    /// Resolves `Auto` against a normalized base URL.
    #[must_use]
    pub fn resolve(self, base_url: &str) -> Self {
        match self {
            Self::Auto if NATIVE_HOST_MARKERS.iter().any(|m| base_url.contains(m)) => Self::Native,
            Self::Auto => Self::OpenAiCompatible,
            explicit => explicit,
        }
    }
}

impl fmt::Display for WireDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the endpoint URL for `dialect`, appending a path suffix only when
/// the address does not already carry one.
#[must_use]
pub fn endpoint_for(base_url: &str, dialect: WireDialect) -> String {
    let base = base_url.trim_end_matches('/');
    match dialect.resolve(base) {
        WireDialect::Native => {
            if base.ends_with(NATIVE_PATH) {
                base.to_string()
            } else {
                format!("{base}{NATIVE_PATH}")
            }
        }
        _ => {
            if base.contains("/v1/chat/completions") || base.contains("/chat/completions") {
                base.to_string()
            } else if base.ends_with("/v1") {
                format!("{base}/chat/completions")
            } else {
                format!("{base}/v1/chat/completions")
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct NativeChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct NativeChatResponse {
    message: Option<NativeMessage>,
}

#[derive(Debug, Deserialize)]
struct NativeMessage {
    #[serde(default)]
    content: String,
}

/// Self-hosted model client.
pub struct SelfHostedClient {
    name: String,
    model: String,
    endpoint: String,
    dialect: WireDialect,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl SelfHostedClient {
    /// Creates a client for `base_url`, resolving the dialect once.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        name: &str,
        base_url: &str,
        model: &str,
        dialect: WireDialect,
    ) -> Result<Self, BackendError> {
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            name: name.to_string(),
            model: model.to_string(),
            endpoint: endpoint_for(base, dialect),
            dialect: dialect.resolve(base),
            api_key: None,
            http: http_client(SELF_HOSTED_TIMEOUT)?,
        })
    }

    /// Adds a bearer key for OpenAI-compatible servers that require one.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<&str>) -> Self {
        self.api_key = api_key.map(str::to_string);
        self
    }

    /// Resolved dialect (never `Auto`).
    #[must_use]
    pub const fn dialect(&self) -> WireDialect {
        self.dialect
    }

    /// Endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn generate_native(&self, prompt: &str) -> Result<String, BackendError> {
        let body = NativeChatRequest {
            model: &self.model,
            messages: [ChatMessage::user(prompt)],
            stream: false,
        };

        tracing::debug!(backend = %self.name, url = %self.endpoint, model = %self.model, "sending native chat request");

        let response = self.http.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: NativeChatResponse =
            serde_json::from_str(&text).map_err(|e| BackendError::Malformed(e.to_string()))?;

        parsed
            .message
            .map(|m| m.content)
            .ok_or_else(|| BackendError::Malformed("response has no message field".to_string()))
    }
}

#[async_trait]
impl Backend for SelfHostedClient {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        match self.dialect {
            WireDialect::Native => self.generate_native(prompt).await,
            _ => {
                post_chat_completion(
                    &self.http,
                    &self.endpoint,
                    self.api_key.as_deref(),
                    &self.model,
                    prompt,
                    &self.name,
                )
                .await
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
