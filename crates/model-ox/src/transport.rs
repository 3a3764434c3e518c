use adk_ox_common::{AuthMethod, BoxStream, CommonRequestError, RequestBuilder, RequestConfig};
use async_trait::async_trait;
use serde_json::Value;

use crate::config::{ProviderKind, ResolvedConfig};

/// Moves request bodies to a vendor and vendor payloads back.
///
/// Models only ever see JSON values, so tests can swap the network for canned
/// payloads.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends one request and returns the decoded response body.
    async fn send(&self, path: &str, body: Value) -> Result<Value, CommonRequestError>;

    /// Sends one streaming request and yields one value per SSE event.
    fn stream(
        &self,
        path: &str,
        body: Value,
    ) -> BoxStream<'static, Result<Value, CommonRequestError>>;
}

/// [`ChatTransport`] over HTTPS with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    request_builder: RequestBuilder,
}

impl HttpTransport {
    #[must_use]
    pub fn new(config: &ResolvedConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuses an existing client, e.g. one with custom timeouts.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ResolvedConfig) -> Self {
        let mut request_config = match config.kind {
            ProviderKind::OpenAiCompatible => RequestConfig::new(&config.base_url)
                .with_auth(AuthMethod::Bearer(config.api_key.clone())),
            ProviderKind::Anthropic => RequestConfig::new(&config.base_url)
                .with_auth(AuthMethod::ApiKey {
                    header_name: anthropic_ox::API_KEY_HEADER.to_string(),
                    key: config.api_key.clone(),
                })
                .with_header(anthropic_ox::API_VERSION_HEADER, anthropic_ox::API_VERSION),
        };

        for (name, value) in &config.headers {
            request_config = request_config.with_header(name, value);
        }

        Self {
            request_builder: RequestBuilder::new(client, request_config),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, path: &str, body: Value) -> Result<Value, CommonRequestError> {
        self.request_builder.post_json(path, &body).await
    }

    fn stream(
        &self,
        path: &str,
        body: Value,
    ) -> BoxStream<'static, Result<Value, CommonRequestError>> {
        self.request_builder.post_stream(path, body)
    }
}
