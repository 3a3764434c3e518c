use thiserror::Error;

/// Errors raised while talking to a vendor endpoint
#[derive(Error, Debug)]
pub enum CommonRequestError {
    /// HTTP request failed before a status was available
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The vendor answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid event data in streaming response
    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    /// The request could not be assembled
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Success status but a body that does not decode
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// UTF-8 conversion error
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

impl CommonRequestError {
    /// Numeric HTTP status, when the vendor returned one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

/// Parse error response from HTTP status and body
#[must_use]
pub fn parse_error_response(status: reqwest::StatusCode, body: &[u8]) -> CommonRequestError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|json| extract_error_message(&json))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    CommonRequestError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Extract error message from the vendor JSON error formats
///
/// OpenAI-compatible and message-blocks vendors both nest it as
/// `{"error": {"message": ...}}`; some proxies put it at the top level.
fn extract_error_message(json: &serde_json::Value) -> Option<String> {
    json.get("error")
        .and_then(|error| error.get("message"))
        .or_else(|| json.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_response_nested_message() {
        let body = br#"{"error": {"type": "invalid_request_error", "message": "bad model"}}"#;
        let err = parse_error_response(reqwest::StatusCode::BAD_REQUEST, body);

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "HTTP 400: bad model");
    }

    #[test]
    fn test_parse_error_response_top_level_message() {
        let body = br#"{"message": "rate limited"}"#;
        let err = parse_error_response(reqwest::StatusCode::TOO_MANY_REQUESTS, body);

        assert_eq!(err.to_string(), "HTTP 429: rate limited");
    }

    #[test]
    fn test_parse_error_response_raw_body() {
        let err = parse_error_response(reqwest::StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(err.to_string(), "HTTP 502: upstream down");
    }

    #[test]
    fn test_status_absent_for_local_errors() {
        let err = CommonRequestError::InvalidEventData("nope".to_string());
        assert_eq!(err.status(), None);
    }
}
