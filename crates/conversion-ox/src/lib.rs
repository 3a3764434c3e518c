//! Framework <-> vendor format conversions
//!
//! Translates the framework-level [`adk_ox::LlmRequest`] into the two supported
//! vendor dialects and turns their responses, single-shot or streamed, back into
//! [`adk_ox::LlmResponse`] values.
//!
//! - [`openai`]: the OpenAI-compatible chat-completion dialect
//! - [`anthropic`]: the message-blocks dialect
//! - [`stream`]: the accumulator both streaming converters share
//!
//! None of the conversion functions fail on malformed vendor data; bad tool
//! arguments become `{}` and missing choices become an error response.

#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

pub mod anthropic;
mod arguments;
pub mod openai;
pub mod options;
pub mod schema;
pub mod stream;
mod turn;

pub use options::{FallbackIdStrategy, RequestOptions};
pub use schema::normalize_schema;
pub use stream::{ChunkOutcome, StreamAccumulator, StreamDialect, StreamSignal, ToolCallSlot};

/// Error types for conversion failures
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// A turn's role is neither `user` nor `model` and strict roles are enabled
    #[error("Unsupported turn role: '{0}'")]
    UnsupportedRole(String),
}
