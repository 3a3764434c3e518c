use adk_ox::{Content, LlmRequest};
use anthropic_ox::{ChatRequest, ContentBlock, DEFAULT_MAX_TOKENS, Message, Role, Tool};
use serde_json::json;

use crate::{
    ConversionError, FallbackIdStrategy, RequestOptions,
    options::IdGenerator,
    schema::parameters_or_default,
    turn::{self, TurnParts, TurnRole},
};

/// System prompt, messages and tools for a messages request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedRequest {
    /// Top-level system prompt; this dialect has no system message.
    pub system: Option<String>,
    pub messages: Vec<Message>,
    /// `None` when no function is declared, never an empty list.
    pub tools: Option<Vec<Tool>>,
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

/// A complete request body for `model`; `max_tokens` falls back to 4096.
///
/// # Errors
/// See [`convert_request_with`].
pub fn build_chat_request(
    request: &LlmRequest,
    model: &str,
    options: &RequestOptions,
) -> Result<ChatRequest, ConversionError> {
    let ConvertedRequest {
        system,
        messages,
        tools,
    } = convert_request_with(request, options)?;
    let config = request.config.as_ref();

    Ok(ChatRequest::builder()
        .model(model)
        .messages(messages)
        .maybe_system(system)
        .maybe_tools(tools)
        .max_tokens(
            config
                .and_then(|c| c.max_output_tokens)
                .unwrap_or(DEFAULT_MAX_TOKENS),
        )
        .maybe_temperature(config.and_then(|c| c.temperature))
        .maybe_top_p(config.and_then(|c| c.top_p))
        .maybe_stop_sequences(config.and_then(|c| c.stop_sequences.clone()))
        .build())
}

/// Walks the turns with the given role policy and id strategy.
fn convert<E>(
    request: &LlmRequest,
    fallback_ids: FallbackIdStrategy,
    role_of: impl Fn(&Content) -> Result<Option<TurnRole>, E>,
) -> Result<ConvertedRequest, E> {
    let mut ids = IdGenerator::new(fallback_ids);

    let messages = turn::convert_turns(&request.contents, role_of, |role, parts, out| {
        let message = match role {
            TurnRole::User => user_message(&parts),
            TurnRole::Model => assistant_message(&parts, &mut ids),
        };
        if !message.is_empty() {
            out.push(message);
        }
    })?;

    Ok(ConvertedRequest {
        system: turn::system_text(request),
        messages,
        tools: convert_tools(request),
    })
}

/// Tool results first, then the joined text; the vendor rejects text placed
/// before a `tool_result` block.
fn user_message(parts: &TurnParts<'_>) -> Message {
    let mut blocks: Vec<ContentBlock> = parts
        .outputs
        .iter()
        .map(|output| ContentBlock::tool_result(output.id.clone(), output.content.clone()))
        .collect();
    if let Some(text) = parts.text() {
        blocks.push(ContentBlock::text(text));
    }
    Message::new(Role::User, blocks)
}

/// Joined text, then one `tool_use` block per call.
fn assistant_message(parts: &TurnParts<'_>, ids: &mut IdGenerator) -> Message {
    let mut blocks = Vec::with_capacity(parts.calls.len() + 1);
    if let Some(text) = parts.text() {
        blocks.push(ContentBlock::text(text));
    }
    blocks.extend(parts.calls.iter().map(|call| {
        ContentBlock::tool_use(
            ids.resolve(call.id.as_deref()),
            &call.name,
            call.args.clone().unwrap_or_else(|| json!({})),
        )
    }));
    Message::new(Role::Assistant, blocks)
}

/// Declarations as vendor tools; `None` when there are none.
fn convert_tools(request: &LlmRequest) -> Option<Vec<Tool>> {
    let tools = turn::declarations(request)
        .map(|declaration| {
            Tool::new(
                &declaration.name,
                declaration.description.clone().unwrap_or_default(),
                parameters_or_default(declaration.parameters.as_ref()),
            )
        })
        .collect();

    turn::non_empty(tools)
}
