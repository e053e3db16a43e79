//! Core domain logic: document catalog, document builder, backend clients
//! and the request orchestrator.

pub mod anthropic;
pub mod backend;
pub mod catalog;
pub mod document;
pub mod openai;
pub mod orchestrator;
pub mod self_hosted;

use serde::{Deserialize, Serialize};

pub use anthropic::AnthropicClient;
pub use backend::{Backend, BackendError, create_backend};
pub use catalog::DocumentType;
pub use document::{Document, Section, append_result, build};
pub use openai::OpenAiClient;
pub use orchestrator::{InFlightRequest, RequestOutcome, dispatch};
pub use self_hosted::{SelfHostedClient, WireDialect};

/// Provider families a backend entry can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderFamily {
    /// Hosted chat-completion API with bearer-token auth.
    #[serde(rename = "openai")]
    OpenAi,
    /// Hosted messages API with `x-api-key` auth.
    #[serde(rename = "claude")]
    Anthropic,
    /// Self-hosted HTTP endpoint such as Ollama.
    #[serde(rename = "local")]
    SelfHosted,
}

impl ProviderFamily {
    /// Returns the display name for the family.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::SelfHosted => "Self-hosted",
        }
    }

    /// Model used when an entry leaves the model name blank.
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => openai::DEFAULT_MODEL,
            Self::Anthropic => anthropic::DEFAULT_MODEL,
            Self::SelfHosted => self_hosted::DEFAULT_MODEL,
        }
    }

    /// Returns true when the family authenticates with an API key.
    #[must_use]
    pub const fn uses_api_key(&self) -> bool {
        matches!(self, Self::OpenAi | Self::Anthropic)
    }

    /// Label for the credential-or-address input field.
    #[must_use]
    pub const fn credential_label(&self) -> &'static str {
        if self.uses_api_key() {
            "API Key"
        } else {
            "Base URL"
        }
    }

    /// Returns all families.
    #[must_use]
    pub const fn all() -> &'static [ProviderFamily] {
        &[Self::OpenAi, Self::Anthropic, Self::SelfHosted]
    }
}
