use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::Content;

/// System instruction as supplied by the host: either a bare string or a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemInstruction {
    Text(String),
    Content(Content),
}

impl SystemInstruction {
    /// Flattens the instruction into one string.
    ///
    /// A string is returned verbatim; a turn has its text parts joined with `"\n"`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Content(content) => content.joined_text(),
        }
    }
}

impl From<String> for SystemInstruction {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for SystemInstruction {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Content> for SystemInstruction {
    fn from(content: Content) -> Self {
        Self::Content(content)
    }
}

/// A function the model may call. `parameters` may use either schema dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters: Some(parameters),
        }
    }
}

/// A configured tool group. Only function declarations are translated; other
/// framework tool kinds are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_declarations: Option<Vec<FunctionDeclaration>>,
}

impl ToolGroup {
    pub fn functions(declarations: impl IntoIterator<Item = FunctionDeclaration>) -> Self {
        Self {
            function_declarations: Some(declarations.into_iter().collect()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// A framework-level generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct LlmRequest {
    /// Turn history, oldest first.
    #[builder(default)]
    #[serde(default)]
    pub contents: Vec<Content>,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GenerateContentConfig>,
}

impl LlmRequest {
    #[must_use]
    pub fn system_instruction(&self) -> Option<&SystemInstruction> {
        self.config.as_ref()?.system_instruction.as_ref()
    }

    #[must_use]
    pub fn tool_groups(&self) -> &[ToolGroup] {
        self.config
            .as_ref()
            .and_then(|config| config.tools.as_deref())
            .unwrap_or_default()
    }
}
