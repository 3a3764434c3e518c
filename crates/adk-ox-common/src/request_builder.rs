use std::collections::HashMap;

use async_stream::try_stream;
use futures_util::stream::{self, BoxStream};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{self, CommonRequestError},
    streaming::SseParser,
};

/// How requests authenticate
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// Key in a vendor-specific header, e.g. `x-api-key: <key>`
    ApiKey { header_name: String, key: String },
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer([REDACTED])"),
            Self::ApiKey { header_name, .. } => f
                .debug_struct("ApiKey")
                .field("header_name", header_name)
                .field("key", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Base URL, credentials and headers shared by every request to one vendor
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub base_url: String,
    pub auth: Option<AuthMethod>,
    pub headers: HashMap<String, String>,
}

impl RequestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: None,
            headers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Joins the base URL and an endpoint path with exactly one slash.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Sends JSON POST requests to one vendor, single-shot or as SSE streams
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: reqwest::Client,
    config: RequestConfig,
}

impl RequestBuilder {
    #[must_use]
    pub fn new(client: reqwest::Client, config: RequestConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// A POST to `path` with auth, the configured headers and `body` attached.
    #[must_use]
    pub fn post(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        let mut req = self.client.post(self.config.url_for(path));

        req = match &self.config.auth {
            Some(AuthMethod::Bearer(token)) => req.bearer_auth(token),
            Some(AuthMethod::ApiKey { header_name, key }) => req.header(header_name, key),
            None => req,
        };

        for (key, value) in &self.config.headers {
            req = req.header(key, value);
        }

        req.json(body)
    }

    /// Sends `body` and decodes the success body as `T`.
    ///
    /// # Errors
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, CommonRequestError> {
        log::trace!("POST {path} payload: {body}");

        let response = self.post(path, body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(error::parse_error_response(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            CommonRequestError::UnexpectedResponse(format!(
                "HTTP {} but failed to decode JSON: {e}; body: {}",
                status.as_u16(),
                String::from_utf8_lossy(&bytes)
            ))
        })
    }

    /// Sends `body` with `"stream": true` set and yields one `T` per SSE event.
    ///
    /// `body` must be a JSON object.
    pub fn post_stream<T>(
        &self,
        path: &str,
        body: Value,
    ) -> BoxStream<'static, Result<T, CommonRequestError>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let Value::Object(mut fields) = body else {
            return Box::pin(stream::once(async {
                Err(CommonRequestError::InvalidRequest(
                    "Streaming body must be a JSON object".to_string(),
                ))
            }));
        };
        fields.insert("stream".to_string(), Value::Bool(true));
        let payload = Value::Object(fields);

        log::trace!("STREAM {path} payload: {payload}");
        let request = self.post(path, &payload);

        Box::pin(try_stream! {
            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                let mut parser = SseParser::new(response);
                while let Some(event) = parser.next_event().await? {
                    yield event;
                }
            } else {
                let bytes = response.bytes().await?;
                Err::<(), _>(error::parse_error_response(status, &bytes))?;
            }
        })
    }
}
