//! Turn walking shared by both request converters

use std::convert::Infallible;

use adk_ox::{Content, FunctionCall, FunctionDeclaration, LlmRequest, Part, Role};

use crate::ConversionError;

/// The two roles a turn can be converted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnRole {
    User,
    Model,
}

/// `user` or `model`; anything else, or no role, is unknown.
fn known_role(content: &Content) -> Option<TurnRole> {
    match content.role.as_ref()? {
        Role::User => Some(TurnRole::User),
        Role::Model => Some(TurnRole::Model),
        Role::Other(_) => None,
    }
}

/// The role as written, `""` when absent.
fn role_name(content: &Content) -> &str {
    content.role.as_ref().map_or("", Role::as_str)
}

/// Unknown roles are dropped.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn lenient_role(content: &Content) -> Result<Option<TurnRole>, Infallible> {
    let role = known_role(content);
    if role.is_none() {
        log::debug!(
            "Dropping turn with unsupported role '{}'",
            role_name(content)
        );
    }
    Ok(role)
}

/// Unknown roles fail the conversion.
pub(crate) fn strict_role(content: &Content) -> Result<Option<TurnRole>, ConversionError> {
    known_role(content)
        .map(Some)
        .ok_or_else(|| ConversionError::UnsupportedRole(role_name(content).to_owned()))
}

/// Runs `emit` for every non-empty turn whose role `role_of` accepts, in order.
pub(crate) fn convert_turns<T, E>(
    contents: &[Content],
    role_of: impl Fn(&Content) -> Result<Option<TurnRole>, E>,
    mut emit: impl FnMut(TurnRole, TurnParts<'_>, &mut Vec<T>),
) -> Result<Vec<T>, E> {
    let mut out = Vec::with_capacity(contents.len());

    for content in contents {
        if content.parts.is_empty() {
            continue;
        }
        if let Some(role) = role_of(content)? {
            emit(role, TurnParts::collect(content), &mut out);
        }
    }

    Ok(out)
}

/// A function response flattened for the wire.
pub(crate) struct ToolOutput {
    /// Missing ids become `""`.
    pub(crate) id: String,
    /// JSON-encoded payload.
    pub(crate) content: String,
}

/// One turn split by part kind, each list in part order.
pub(crate) struct TurnParts<'a> {
    /// Text parts joined with `"\n"`.
    pub(crate) text: String,
    /// Function calls in part order.
    pub(crate) calls: Vec<&'a FunctionCall>,
    /// Function responses in part order.
    pub(crate) outputs: Vec<ToolOutput>,
}

impl<'a> TurnParts<'a> {
    /// Splits `content` by part kind.
    fn collect(content: &'a Content) -> Self {
        let mut calls = Vec::new();
        let mut outputs = Vec::new();

        for part in &content.parts {
            match part {
                Part::FunctionCall(call) => calls.push(call),
                Part::FunctionResponse(response) => outputs.push(ToolOutput {
                    id: response.id.clone().unwrap_or_default(),
                    content: response.response.to_string(),
                }),
                Part::Text(_) => {}
            }
        }

        Self {
            text: content.joined_text(),
            calls,
            outputs,
        }
    }

    /// The joined text, or `None` when there is none.
    pub(crate) fn text(&self) -> Option<&str> {
        (!self.text.is_empty()).then_some(self.text.as_str())
    }
}

/// System instruction flattened to a string; empty counts as absent.
pub(crate) fn system_text(request: &LlmRequest) -> Option<String> {
    request
        .system_instruction()
        .map(adk_ox::SystemInstruction::to_text)
        .filter(|text| !text.is_empty())
}

/// Every function declaration across all configured tool groups, in order.
pub(crate) fn declarations(request: &LlmRequest) -> impl Iterator<Item = &FunctionDeclaration> {
    request
        .tool_groups()
        .iter()
        .filter_map(|group| group.function_declarations.as_deref())
        .flatten()
}

/// `None` instead of an empty list so the field is left off the wire.
pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
