use adk_ox::{Content, LlmRequest};
use adk_ox_common::{ChatMessage, ChatRequest, ChatTool, FunctionDefinition, ToolCall};

use crate::{
    ConversionError, FallbackIdStrategy, RequestOptions,
    options::IdGenerator,
    schema::parameters_or_default,
    turn::{self, TurnParts, TurnRole},
};

/// Messages and tools for a chat-completion request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedRequest {
    /// System message first (if any), then the converted turns.
    pub messages: Vec<ChatMessage>,
    /// `None` when no function is declared, never an empty list.
    pub tools: Option<Vec<ChatTool>>,
}

/// Converts with default options: unknown roles are dropped, missing call ids
/// become `call_<millis>`.
#[must_use]
pub fn convert_request(request: &LlmRequest) -> ConvertedRequest {
    let Ok(converted) = convert(request, FallbackIdStrategy::default(), turn::lenient_role);
    converted
}

/// # Errors
/// [`ConversionError::UnsupportedRole`] when `options.strict_roles` is set and a
/// non-empty turn is neither `user` nor `model`.
pub fn convert_request_with(
    request: &LlmRequest,
    options: &RequestOptions,
) -> Result<ConvertedRequest, ConversionError> {
    if options.strict_roles {
        convert(request, options.fallback_ids, turn::strict_role)
    } else {
        let Ok(converted) = convert(request, options.fallback_ids, turn::lenient_role);
        Ok(converted)
    }
}

/// A complete request body for `model`, carrying the generation parameters.
///
/// # Errors
/// See [`convert_request_with`].
pub fn build_chat_request(
    request: &LlmRequest,
    model: &str,
    options: &RequestOptions,
) -> Result<ChatRequest, ConversionError> {
    let ConvertedRequest { messages, tools } = convert_request_with(request, options)?;
    let config = request.config.as_ref();

    Ok(ChatRequest::builder()
        .model(model)
        .messages(messages)
        .maybe_tools(tools)
        .maybe_temperature(config.and_then(|c| c.temperature))
        .maybe_top_p(config.and_then(|c| c.top_p))
        .maybe_max_tokens(config.and_then(|c| c.max_output_tokens))
        .maybe_stop(config.and_then(|c| c.stop_sequences.clone()))
        .build())
}

/// Walks the turns with the given role policy and id strategy.
fn convert<E>(
    request: &LlmRequest,
    fallback_ids: FallbackIdStrategy,
    role_of: impl Fn(&Content) -> Result<Option<TurnRole>, E>,
) -> Result<ConvertedRequest, E> {
    let mut ids = IdGenerator::new(fallback_ids);

    let turns = turn::convert_turns(&request.contents, role_of, |role, parts, out| {
        push_turn(role, &parts, &mut ids, out);
    })?;

    let mut messages = Vec::with_capacity(turns.len() + 1);
    if let Some(system) = turn::system_text(request) {
        messages.push(ChatMessage::system(system));
    }
    messages.extend(turns);

    Ok(ConvertedRequest {
        messages,
        tools: convert_tools(request),
    })
}

/// Appends the messages one turn converts to.
fn push_turn(
    role: TurnRole,
    parts: &TurnParts<'_>,
    ids: &mut IdGenerator,
    out: &mut Vec<ChatMessage>,
) {
    match role {
        TurnRole::User => {
            if let Some(text) = parts.text() {
                out.push(ChatMessage::user(text));
            }
            out.extend(
                parts
                    .outputs
                    .iter()
                    .map(|output| ChatMessage::tool(output.id.clone(), output.content.clone())),
            );
        }
        TurnRole::Model => {
            if parts.text().is_none() && parts.calls.is_empty() {
                return;
            }

            let tool_calls = parts
                .calls
                .iter()
                .map(|call| {
                    let arguments = call
                        .args
                        .as_ref()
                        .map_or_else(|| "{}".to_owned(), ToString::to_string);
                    ToolCall::function(ids.resolve(call.id.as_deref()), &call.name, arguments)
                })
                .collect();

            out.push(ChatMessage::Assistant {
                content: parts.text().map(str::to_owned),
                tool_calls: turn::non_empty(tool_calls),
            });
        }
    }
}

/// Declarations as function tools; `None` when there are none.
fn convert_tools(request: &LlmRequest) -> Option<Vec<ChatTool>> {
    let tools = turn::declarations(request)
        .map(|declaration| {
            ChatTool::function(FunctionDefinition {
                name: declaration.name.clone(),
                description: declaration.description.clone().unwrap_or_default(),
                parameters: parameters_or_default(declaration.parameters.as_ref()),
            })
        })
        .collect();

    turn::non_empty(tools)
}
