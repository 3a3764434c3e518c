use adk_ox::{FunctionCall, LlmResponse, Part, UsageMetadata};
use adk_ox_common::{ChatResponse, Usage};

use crate::arguments::{non_empty_id, parse_arguments};

/// Converts a complete chat-completion response.
///
/// Only the first choice is read. No choice at all yields the `NO_CHOICE` error
/// response; undecodable tool arguments become `{}`.
#[must_use]
pub fn convert_response(response: &ChatResponse) -> LlmResponse {
    let Some(choice) = response.choices.first() else {
        log::debug!("Chat response {} carried no choice", response.id);
        return LlmResponse::no_choice();
    };
    let message = &choice.message;

    let mut parts = Vec::new();
    if let Some(text) = message.content.as_deref().filter(|text| !text.is_empty()) {
        parts.push(Part::text(text));
    }
    for call in message.tool_calls.iter().flatten() {
        parts.push(Part::FunctionCall(FunctionCall {
            id: non_empty_id(&call.id),
            name: call.function.name.clone(),
            args: Some(parse_arguments(
                &call.function.name,
                &call.function.arguments,
            )),
        }));
    }

    LlmResponse::final_turn(parts).with_usage(response.usage.map(usage_metadata))
}

/// Vendor token counts, passed through unchanged.
#[must_use]
pub fn usage_metadata(usage: Usage) -> UsageMetadata {
    UsageMetadata {
        prompt_token_count: usage.prompt_tokens,
        candidates_token_count: usage.completion_tokens,
        total_token_count: usage.total_tokens,
    }
}
