//! Stream accumulation shared by both vendor dialects
//!
//! Vendors stream text and tool calls as fragments: tool names and argument JSON
//! may be split at arbitrary byte boundaries. [`StreamAccumulator`] rebuilds the
//! turn from those fragments. Each dialect only has to say what a chunk means
//! (a [`StreamDialect`]); appending, assembly and reset live here once.
//!
//! One accumulator belongs to one stream. It holds no shared state, so concurrent
//! requests each use their own; sharing one between concurrent streams mixes
//! their turns and is not guarded against.

use std::collections::BTreeMap;

use adk_ox::{FunctionCall, LlmResponse, Part};

use crate::arguments::{non_empty_id, parse_arguments};

/// What a single vendor chunk means for the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSignal {
    /// A text fragment; emitted downstream as a partial response.
    Text(String),
    /// Part of a tool call addressed by index. The slot is created on first sight;
    /// A non-empty `id` overwrites, `name` and `arguments` append.
    ToolCallFragment {
        index: usize,
        id: Option<String>,
        name: Option<String>,
        arguments: Option<String>,
    },
    /// A content block opened. Tool-use blocks carry their id and name and get a slot.
    BlockStart {
        index: usize,
        tool_use: Option<(String, String)>,
    },
    /// Argument JSON for the tool-use block at `index`.
    ArgumentsDelta { index: usize, fragment: String },
    /// The turn is over.
    Finish,
}

/// Classifies one vendor chunk into accumulator signals.
pub trait StreamDialect {
    type Chunk;

    /// Signals in the order they must be applied; empty for no-op chunks.
    fn classify(chunk: &Self::Chunk) -> Vec<StreamSignal>;
}

/// A tool call under reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallSlot {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// Result of feeding one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkOutcome {
    /// A partial text response, the final response, or nothing.
    pub response: Option<LlmResponse>,
    /// Set only when `response` is the final response of the turn.
    pub is_complete: bool,
}

impl ChunkOutcome {
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }
}

/// Running state of one streamed turn.
#[derive(Debug, Clone, Default)]
pub struct StreamAccumulator {
    text: String,
    tool_calls: BTreeMap<usize, ToolCallSlot>,
    current_block: Option<usize>,
}

impl StreamAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text received so far in this turn.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tool-call slots by fragment or block index.
    #[must_use]
    pub fn tool_calls(&self) -> &BTreeMap<usize, ToolCallSlot> {
        &self.tool_calls
    }

    /// Index of the last content block opened, for block-event dialects.
    #[must_use]
    pub fn current_block(&self) -> Option<usize> {
        self.current_block
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tool_calls.is_empty()
    }

    /// Feeds one chunk of dialect `D`.
    ///
    /// When a chunk yields both a partial and the final response, the final one wins.
    pub fn convert<D: StreamDialect>(&mut self, chunk: &D::Chunk) -> ChunkOutcome {
        let mut outcome = ChunkOutcome::pending();

        for signal in D::classify(chunk) {
            let finish = signal == StreamSignal::Finish;
            if let Some(response) = self.apply(signal) {
                outcome.response = Some(response);
                outcome.is_complete |= finish;
            }
        }

        outcome
    }

    /// Applies one signal, returning the response it produces, if any.
    pub fn apply(&mut self, signal: StreamSignal) -> Option<LlmResponse> {
        match signal {
            StreamSignal::Text(fragment) => {
                if fragment.is_empty() {
                    return None;
                }
                self.text.push_str(&fragment);
                Some(LlmResponse::partial_text(fragment))
            }
            StreamSignal::ToolCallFragment {
                index,
                id,
                name,
                arguments,
            } => {
                let slot = self.tool_calls.entry(index).or_default();
                if let Some(id) = id.filter(|id| !id.is_empty()) {
                    slot.id = id;
                }
                if let Some(name) = name {
                    slot.name.push_str(&name);
                }
                if let Some(arguments) = arguments {
                    slot.arguments.push_str(&arguments);
                }
                None
            }
            StreamSignal::BlockStart { index, tool_use } => {
                self.current_block = Some(index);
                if let Some((id, name)) = tool_use {
                    self.tool_calls.insert(
                        index,
                        ToolCallSlot {
                            id,
                            name,
                            arguments: String::new(),
                        },
                    );
                }
                None
            }
            StreamSignal::ArgumentsDelta { index, fragment } => {
                if let Some(slot) = self.tool_calls.get_mut(&index) {
                    slot.arguments.push_str(&fragment);
                } else {
                    log::debug!("Ignoring argument fragment for unknown block {index}");
                }
                None
            }
            StreamSignal::Finish => Some(self.finish()),
        }
    }

    /// Assembles the final response and resets for the next turn.
    fn finish(&mut self) -> LlmResponse {
        let text = std::mem::take(&mut self.text);
        let tool_calls = std::mem::take(&mut self.tool_calls);
        self.current_block = None;

        let mut parts = Vec::with_capacity(tool_calls.len() + 1);
        if !text.is_empty() {
            parts.push(Part::Text(text));
        }
        for (index, slot) in tool_calls {
            if slot.name.is_empty() {
                log::debug!("Dropping unnamed tool call at index {index}");
                continue;
            }
            let args = parse_arguments(&slot.name, &slot.arguments);
            parts.push(Part::FunctionCall(FunctionCall {
                id: non_empty_id(&slot.id),
                name: slot.name,
                args: Some(args),
            }));
        }

        LlmResponse::final_turn(parts)
    }
}
