use adk_ox::LlmResponse;
use adk_ox_common::CommonRequestError;
use conversion_ox::ConversionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Transport failure or non-success status
    #[error(transparent)]
    Transport(#[from] CommonRequestError),

    /// Request conversion refused the conversation
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A vendor payload did not have the expected shape
    #[error("Failed to decode vendor payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing API key: set {variable} or configure one explicitly")]
    MissingApiKey { variable: String },

    #[error("Provider '{0}' is not registered")]
    UnknownProvider(String),

    /// Error event sent inside a stream
    #[error("Stream error ({kind}): {message}")]
    Stream { kind: String, message: String },
}

impl ModelError {
    /// Numeric HTTP status, when the failure came with one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// The error as a framework response.
    ///
    /// `errorCode` is `API_ERROR_<status>` when a status is known, else `fallback_code`.
    #[must_use]
    pub fn into_response(self, fallback_code: &str) -> LlmResponse {
        let code = self.status().map_or_else(
            || fallback_code.to_owned(),
            |status| format!("API_ERROR_{status}"),
        );
        LlmResponse::error(code, self.to_string())
    }
}
