use std::collections::BTreeMap;

use bon::Builder;
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::error::ModelError;

/// Wire dialect a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ProviderKind {
    #[strum(serialize = "openai_compatible")]
    OpenAiCompatible,
    #[strum(serialize = "anthropic")]
    Anthropic,
}

impl ProviderKind {
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "https://api.openai.com/v1",
            Self::Anthropic => anthropic_ox::BASE_URL,
        }
    }

    /// Environment variable consulted when no prefixed key is set.
    #[must_use]
    pub fn api_key_variable(self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Chat endpoint, relative to the base URL.
    #[must_use]
    pub fn chat_path(self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "chat/completions",
            Self::Anthropic => anthropic_ox::CHAT_URL,
        }
    }

    /// `errorCode` for failures that carry no HTTP status.
    #[must_use]
    pub fn error_code(self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "OPENAI_COMPATIBLE_ERROR",
            Self::Anthropic => "ANTHROPIC_ERROR",
        }
    }
}

/// Provider settings as configured; missing values are looked up on [`resolve`](Self::resolve).
#[derive(Clone, Builder)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    #[builder(into)]
    pub api_key: Option<String>,
    #[builder(into)]
    pub base_url: Option<String>,
    /// Prefix for `<PREFIX>_API_KEY` and `<PREFIX>_BASE_URL`, e.g. `GROQ`.
    #[builder(into)]
    pub env_prefix: Option<String>,
    /// Sent with every request.
    #[builder(default)]
    pub headers: BTreeMap<String, String>,
    /// Merged verbatim into OpenAI-compatible request bodies.
    #[builder(default)]
    pub extra_body: Map<String, Value>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("env_prefix", &self.env_prefix)
            .field("headers", &self.headers)
            .field("extra_body", &self.extra_body)
            .finish()
    }
}

/// Fully resolved provider settings.
#[derive(Clone)]
pub struct ResolvedConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub base_url: String,
    pub headers: BTreeMap<String, String>,
    pub extra_body: Map<String, Value>,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("kind", &self.kind)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("extra_body", &self.extra_body)
            .finish()
    }
}

impl ProviderConfig {
    /// Shorthand for a config with nothing set but the kind.
    #[must_use]
    pub fn new(kind: ProviderKind) -> Self {
        Self::builder().kind(kind).build()
    }

    /// Resolves against the process environment.
    ///
    /// # Errors
    /// [`ModelError::MissingApiKey`] when no key is configured or found.
    pub fn resolve(&self) -> Result<ResolvedConfig, ModelError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves against `lookup` instead of the process environment.
    ///
    /// Key: explicit, then `<PREFIX>_API_KEY`, then the kind's canonical variable.
    /// Base URL: explicit, then `<PREFIX>_BASE_URL`, then the kind's default.
    /// Empty values count as unset.
    ///
    /// # Errors
    /// [`ModelError::MissingApiKey`] when no key is configured or found.
    pub fn resolve_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedConfig, ModelError> {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let prefixed = |suffix: &str| {
            self.env_prefix
                .as_deref()
                .and_then(|prefix| lookup(&format!("{prefix}_{suffix}")))
        };

        let api_key = non_empty(self.api_key.as_deref())
            .or_else(|| prefixed("API_KEY"))
            .or_else(|| lookup(self.kind.api_key_variable()))
            .ok_or_else(|| ModelError::MissingApiKey {
                variable: self.env_prefix.as_deref().map_or_else(
                    || self.kind.api_key_variable().to_owned(),
                    |prefix| format!("{prefix}_API_KEY"),
                ),
            })?;

        let base_url = non_empty(self.base_url.as_deref())
            .or_else(|| prefixed("BASE_URL"))
            .unwrap_or_else(|| self.kind.default_base_url().to_owned());

        Ok(ResolvedConfig {
            kind: self.kind,
            api_key,
            base_url,
            headers: self.headers.clone(),
            extra_body: self.extra_body.clone(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}
