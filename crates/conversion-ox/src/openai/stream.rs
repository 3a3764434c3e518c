use adk_ox_common::ChatCompletionChunk;

use crate::stream::{ChunkOutcome, StreamAccumulator, StreamDialect, StreamSignal};

/// Incremental-delta chunks: text and indexed tool-call fragments in `delta`,
/// end of turn flagged by a non-null `finish_reason`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiDialect;

impl StreamDialect for OpenAiDialect {
    type Chunk = ChatCompletionChunk;

    fn classify(chunk: &ChatCompletionChunk) -> Vec<StreamSignal> {
        let Some(choice) = chunk.choices.first() else {
            return Vec::new();
        };
        let delta = &choice.delta;
        let mut signals = Vec::new();

        // Text is checked first; a chunk carrying text never has its tool-call
        // fragments read.
        match delta.content.as_deref() {
            Some(text) if !text.is_empty() => signals.push(StreamSignal::Text(text.to_owned())),
            _ => signals.extend(delta.tool_calls.iter().flatten().map(|call| {
                let function = call.function.as_ref();
                StreamSignal::ToolCallFragment {
                    index: call.index.unwrap_or(0),
                    id: call.id.clone(),
                    name: function.and_then(|f| f.name.clone()),
                    arguments: function.and_then(|f| f.arguments.clone()),
                }
            })),
        }

        if choice.finish_reason.is_some() {
            signals.push(StreamSignal::Finish);
        }

        signals
    }
}

/// Feeds one chat-completion chunk into `acc`.
pub fn convert_chunk(chunk: &ChatCompletionChunk, acc: &mut StreamAccumulator) -> ChunkOutcome {
    acc.convert::<OpenAiDialect>(chunk)
}
