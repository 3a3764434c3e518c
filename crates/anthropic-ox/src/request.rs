use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_TOKENS, message::Message, tool::Tool};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Builder)]
pub struct ChatRequest {
    #[builder(into)]
    pub model: String,
    #[builder(default)]
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub system: Option<String>,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

impl ChatRequest {
    /// Enable streaming for this request
    #[must_use]
    pub fn streaming(mut self) -> Self {
        self.stream = Some(true);
        self
    }
}
