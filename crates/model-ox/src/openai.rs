use std::sync::Arc;

use adk_ox::{LlmRequest, LlmResponse};
use adk_ox_common::{ChatCompletionChunk, ChatResponse};
use async_stream::stream;
use bon::Builder;
use conversion_ox::{RequestOptions, StreamAccumulator, openai};
use futures_util::{StreamExt, stream::BoxStream};
use serde_json::{Map, Value};

use crate::{
    config::{ProviderKind, ResolvedConfig},
    error::ModelError,
    model::{Model, decode},
    transport::{ChatTransport, HttpTransport},
};

const KIND: ProviderKind = ProviderKind::OpenAiCompatible;

/// Model speaking the OpenAI chat-completion dialect.
///
/// Works against any vendor exposing `POST {base_url}/chat/completions`.
#[derive(Clone, Builder)]
pub struct OpenAiCompatibleModel {
    transport: Arc<dyn ChatTransport>,
    /// Used when the request names no model
    #[builder(into)]
    model: String,
    #[builder(default)]
    options: RequestOptions,
    /// Vendor-specific fields added to every request body
    #[builder(default)]
    extra_body: Map<String, Value>,
}

impl std::fmt::Debug for OpenAiCompatibleModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleModel")
            .field("model", &self.model)
            .field("options", &self.options)
            .field("extra_body", &self.extra_body)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleModel {
    /// An HTTP-backed model for a resolved provider.
    #[must_use]
    pub fn from_config(config: &ResolvedConfig, model: impl Into<String>) -> Self {
        Self::builder()
            .transport(Arc::new(HttpTransport::new(config)))
            .model(model)
            .extra_body(config.extra_body.clone())
            .build()
    }

    /// The outgoing JSON body, with extra fields merged in.
    ///
    /// # Errors
    /// Conversion failures under strict roles.
    pub fn request_body(&self, request: &LlmRequest, stream: bool) -> Result<Value, ModelError> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let mut chat = openai::build_chat_request(request, model, &self.options)?;

        chat.extra.extend(self.extra_body.clone());
        if stream {
            chat.stream = Some(true);
        }

        Ok(serde_json::to_value(chat)?)
    }

    async fn send(&self, request: &LlmRequest) -> Result<LlmResponse, ModelError> {
        let body = self.request_body(request, false)?;
        let value = self.transport.send(KIND.chat_path(), body).await?;
        let response: ChatResponse = serde_json::from_value(value)?;
        Ok(openai::convert_response(&response))
    }

    fn error_response(err: ModelError) -> LlmResponse {
        log::warn!("OpenAI-compatible request failed: {err}");
        err.into_response(KIND.error_code())
    }
}

impl Model for OpenAiCompatibleModel {
    fn name(&self) -> &str {
        &self.model
    }

    fn generate_content(&self, request: LlmRequest, stream: bool) -> BoxStream<'_, LlmResponse> {
        if !stream {
            return Box::pin(stream! {
                yield self.send(&request).await.unwrap_or_else(Self::error_response);
            });
        }

        Box::pin(stream! {
            let body = match self.request_body(&request, true) {
                Ok(body) => body,
                Err(err) => {
                    yield Self::error_response(err);
                    return;
                }
            };

            let mut chunks = self.transport.stream(KIND.chat_path(), body);
            let mut accumulator = StreamAccumulator::new();

            while let Some(item) = chunks.next().await {
                let chunk: ChatCompletionChunk = match decode(item) {
                    Ok(chunk) => chunk,
                    Err(err) => {
                        yield Self::error_response(err);
                        return;
                    }
                };

                let outcome = openai::convert_chunk(&chunk, &mut accumulator);
                if let Some(response) = outcome.response {
                    yield response;
                }
                if outcome.is_complete {
                    return;
                }
            }

            log::debug!("Stream ended without a finish reason");
        })
    }
}
