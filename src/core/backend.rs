//! Backend client abstraction.
//!
//! Every provider family implements [`Backend`], so the orchestrator can call
//! any configured backend uniformly. [`create_backend`] picks the concrete
//! client from a configuration entry.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::ProviderFamily;
use super::anthropic::AnthropicClient;
use super::openai::OpenAiClient;
use super::self_hosted::SelfHostedClient;
use crate::fs::BackendEntry;

/// Timeout applied to hosted API calls.
pub const HOSTED_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors produced by backend construction or a `generate` call.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The entry lacks a credential or address its family requires.
    #[error("backend '{backend}' is missing its {missing}")]
    Config {
        backend: String,
        missing: &'static str,
    },

    /// Transport failure (connection refused, timeout, TLS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response parsed but held no text.
    #[error("{0} returned no text content")]
    EmptyResponse(String),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The provider does not know the requested model.
    #[error("Model '{model}' not found. Try using {}", join_models(.known))]
    ModelNotFound {
        model: String,
        known: &'static [&'static str],
    },
}

impl BackendError {
    /// Returns true for errors that are fixed by editing the configuration.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Formats `a, b, or c`.
fn join_models(models: &[&str]) -> String {
    match models {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

/// A text-generation backend.
///
/// Implementations send the prompt as a single user turn and return the
/// generated text. They enforce their own timeouts and never retry.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Sends `prompt` and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response without text.
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;

    /// Identifier of the configuration entry this client was built from.
    fn name(&self) -> &str;
}

/// Builds an HTTP client with the given request timeout.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, BackendError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Returns the trimmed value when it is present and non-blank.
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Creates the client for the entry identified by `id`.
///
/// # Errors
///
/// Returns [`BackendError::Config`] when a hosted entry has no API key or a
/// self-hosted entry has no base URL.
pub fn create_backend(id: &str, entry: &BackendEntry) -> Result<Box<dyn Backend>, BackendError> {
    let model = match entry.model_name.trim() {
        "" => entry.provider.default_model(),
        name => name,
    };
    let base_url = non_blank(entry.api_base_url.as_ref());

    match entry.provider {
        ProviderFamily::OpenAi => {
            let key = non_blank(entry.api_key.as_ref()).ok_or_else(|| BackendError::Config {
                backend: id.to_string(),
                missing: "API key",
            })?;
            let mut client = OpenAiClient::new(id, key, model)?;
            if let Some(base) = base_url {
                client = client.with_base_url(base);
            }
            Ok(Box::new(client))
        }
        ProviderFamily::Anthropic => {
            let key = non_blank(entry.api_key.as_ref()).ok_or_else(|| BackendError::Config {
                backend: id.to_string(),
                missing: "API key",
            })?;
            let mut client = AnthropicClient::new(id, key, model)?;
            if let Some(base) = base_url {
                client = client.with_base_url(base);
            }
            Ok(Box::new(client))
        }
        ProviderFamily::SelfHosted => {
            let base = base_url.ok_or_else(|| BackendError::Config {
                backend: id.to_string(),
                missing: "base URL",
            })?;
            let client = SelfHostedClient::new(id, base, model, entry.dialect)?
                .with_api_key(non_blank(entry.api_key.as_ref()));
            Ok(Box::new(client))
        }
    }
}
