use adk_ox::{LlmRequest, LlmResponse};
use adk_ox_common::CommonRequestError;
use futures_util::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ModelError;

/// A framework model backed by a vendor endpoint.
///
/// Failures never surface as `Err`: they arrive in the stream as error
/// responses with `errorCode` and `errorMessage` set.
pub trait Model: Send + Sync {
    /// Default model identifier, used when the request names none.
    fn name(&self) -> &str;

    /// Generates a reply for `request`.
    ///
    /// Non-streaming calls yield exactly one response. Streaming calls yield
    /// partial text responses followed by one final response, or a single
    /// error response at the point of failure.
    fn generate_content(&self, request: LlmRequest, stream: bool) -> BoxStream<'_, LlmResponse>;
}

/// Decodes one transported payload into a dialect type.
pub(crate) fn decode<T: DeserializeOwned>(
    item: Result<Value, CommonRequestError>,
) -> Result<T, ModelError> {
    Ok(serde_json::from_value(item?)?)
}
