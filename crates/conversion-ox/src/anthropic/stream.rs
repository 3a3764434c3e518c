use anthropic_ox::{ContentBlock, ContentBlockDelta, StreamEvent};

use crate::stream::{ChunkOutcome, StreamAccumulator, StreamDialect, StreamSignal};

/// Block-event streams: explicit block start, delta and message stop events.
///
/// Error events are not turned into signals here; the caller decides how a
/// vendor error ends the stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicDialect;

impl StreamDialect for AnthropicDialect {
    type Chunk = StreamEvent;

    fn classify(event: &StreamEvent) -> Vec<StreamSignal> {
        let signal = match event {
            StreamEvent::ContentBlockStart {
                index,
                content_block,
            } => StreamSignal::BlockStart {
                index: *index,
                tool_use: match content_block {
                    ContentBlock::ToolUse { id, name, .. } => Some((id.clone(), name.clone())),
                    _ => None,
                },
            },
            StreamEvent::ContentBlockDelta { index, delta } => match delta {
                ContentBlockDelta::TextDelta { text } => StreamSignal::Text(text.clone()),
                ContentBlockDelta::InputJsonDelta { partial_json } => {
                    StreamSignal::ArgumentsDelta {
                        index: *index,
                        fragment: partial_json.clone(),
                    }
                }
                ContentBlockDelta::Other => return Vec::new(),
            },
            StreamEvent::MessageStop => StreamSignal::Finish,
            _ => return Vec::new(),
        };

        vec![signal]
    }
}

/// Feeds one stream event into `acc`.
pub fn convert_event(event: &StreamEvent, acc: &mut StreamAccumulator) -> ChunkOutcome {
    acc.convert::<AnthropicDialect>(event)
}
