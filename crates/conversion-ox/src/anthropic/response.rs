use adk_ox::{FunctionCall, LlmResponse, Part, UsageMetadata};
use anthropic_ox::{ChatResponse, ContentBlock, Usage};
use serde_json::{Value, json};

use crate::arguments::non_empty_id;

/// Converts a complete messages response, keeping block order.
#[must_use]
pub fn convert_response(response: &ChatResponse) -> LlmResponse {
    let parts = response
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } if !text.is_empty() => Some(Part::text(text)),
            ContentBlock::ToolUse { id, name, input } => Some(Part::FunctionCall(FunctionCall {
                id: non_empty_id(id),
                name: name.clone(),
                args: Some(match input {
                    Value::Null => json!({}),
                    input => input.clone(),
                }),
            })),
            _ => None,
        })
        .collect();

    LlmResponse::final_turn(parts).with_usage(response.usage.map(usage_metadata))
}

/// Total is derived; this vendor reports only input and output counts.
#[must_use]
pub fn usage_metadata(usage: Usage) -> UsageMetadata {
    UsageMetadata {
        prompt_token_count: usage.input_tokens,
        candidates_token_count: usage.output_tokens,
        total_token_count: usage.input_tokens.saturating_add(usage.output_tokens),
    }
}
