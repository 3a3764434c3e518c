use serde::{Deserialize, Serialize};

use crate::content::{Content, Part, Role};

/// Error code for a vendor response that carried no choice at all.
pub const NO_CHOICE_ERROR_CODE: &str = "NO_CHOICE";
/// Error message paired with [`NO_CHOICE_ERROR_CODE`].
pub const NO_CHOICE_ERROR_MESSAGE: &str = "No response choice";

/// Token accounting as reported by the vendor, passed through unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Number of tokens in the prompt.
    pub prompt_token_count: u32,
    /// Number of tokens in the generated candidates.
    pub candidates_token_count: u32,
    /// Total token count for the request.
    pub total_token_count: u32,
}

/// A framework-level response, or one fragment of a streamed response.
///
/// Error responses use the same type so callers can treat every item uniformly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default)]
    pub turn_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LlmResponse {
    /// A streamed text fragment: carries only the fragment, never the running text.
    pub fn partial_text(fragment: impl Into<String>) -> Self {
        Self {
            content: Some(Content::new(Role::Model, [Part::text(fragment)])),
            turn_complete: false,
            partial: Some(true),
            ..Self::default()
        }
    }

    /// A completed turn. An empty part list yields no `content` at all.
    #[must_use]
    pub fn final_turn(parts: Vec<Part>) -> Self {
        Self {
            content: model_content(parts),
            turn_complete: true,
            ..Self::default()
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: Some(code.into()),
            error_message: Some(message.into()),
            turn_complete: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn no_choice() -> Self {
        Self::error(NO_CHOICE_ERROR_CODE, NO_CHOICE_ERROR_MESSAGE)
    }

    #[must_use]
    pub fn with_usage(mut self, usage: Option<UsageMetadata>) -> Self {
        self.usage_metadata = usage;
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error_code.is_some()
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.partial.unwrap_or(false)
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        self.content.as_ref().map(Content::parts).unwrap_or_default()
    }

    /// All text parts concatenated without separators.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts().iter().filter_map(Part::as_text).collect()
    }
}

fn model_content(parts: Vec<Part>) -> Option<Content> {
    if parts.is_empty() {
        None
    } else {
        Some(Content::new(Role::Model, parts))
    }
}
