use std::sync::Arc;

use adk_ox::{LlmRequest, LlmResponse};
use anthropic_ox::{ChatResponse, StreamEvent};
use async_stream::stream;
use bon::Builder;
use conversion_ox::{RequestOptions, StreamAccumulator, anthropic};
use futures_util::{StreamExt, stream::BoxStream};
use serde_json::Value;

use crate::{
    config::{ProviderKind, ResolvedConfig},
    error::ModelError,
    model::{Model, decode},
    transport::{ChatTransport, HttpTransport},
};

const KIND: ProviderKind = ProviderKind::Anthropic;

/// Model speaking the message-blocks dialect.
#[derive(Clone, Builder)]
pub struct AnthropicModel {
    transport: Arc<dyn ChatTransport>,
    #[builder(into)]
    model: String,
    #[builder(default)]
    options: RequestOptions,
}

impl std::fmt::Debug for AnthropicModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicModel")
            .field("model", &self.model)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl AnthropicModel {
    #[must_use]
    pub fn from_config(config: &ResolvedConfig, model: impl Into<String>) -> Self {
        if !config.extra_body.is_empty() {
            log::debug!("Extra body fields are not sent to message-blocks vendors");
        }
        Self::builder()
            .transport(Arc::new(HttpTransport::new(config)))
            .model(model)
            .build()
    }

    /// # Errors
    /// Conversion failures under strict roles.
    pub fn request_body(&self, request: &LlmRequest, stream: bool) -> Result<Value, ModelError> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let mut chat = anthropic::build_chat_request(request, model, &self.options)?;
        if stream {
            chat = chat.streaming();
        }
        Ok(serde_json::to_value(chat)?)
    }

    async fn send(&self, request: &LlmRequest) -> Result<LlmResponse, ModelError> {
        let body = self.request_body(request, false)?;
        let value = self.transport.send(KIND.chat_path(), body).await?;
        let response: ChatResponse = serde_json::from_value(value)?;
        Ok(anthropic::convert_response(&response))
    }

    fn error_response(err: ModelError) -> LlmResponse {
        log::warn!("Anthropic request failed: {err}");
        err.into_response(KIND.error_code())
    }
}

impl Model for AnthropicModel {
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

            let mut events = self.transport.stream(KIND.chat_path(), body);
            let mut accumulator = StreamAccumulator::new();

            while let Some(item) = events.next().await {
                let event: StreamEvent = match decode(item) {
                    Ok(event) => event,
                    Err(err) => {
                        yield Self::error_response(err);
                        return;
                    }
                };

                if let StreamEvent::Error { error } = event {
                    yield Self::error_response(ModelError::Stream {
                        kind: error.r#type,
                        message: error.message,
                    });
                    return;
                }

                let outcome = anthropic::convert_event(&event, &mut accumulator);
                if let Some(response) = outcome.response {
                    yield response;
                }
                if outcome.is_complete {
                    return;
                }
            }

            log::debug!("Stream ended before message_stop");
        })
    }
}
