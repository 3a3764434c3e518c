#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Wire types for the Anthropic messages API
//!
//! Only the shapes are defined here; sending them is the transport's job.

pub mod message;
pub mod request;
pub mod response;
pub mod tool;

pub use message::{ContentBlock, Message, Role};
pub use request::ChatRequest;
pub use response::{
    ChatResponse, ContentBlockDelta, ErrorInfo, MessageDelta, StopReason, StreamEvent, Usage,
};
pub use tool::Tool;

/// Public API root.
pub const BASE_URL: &str = "https://api.anthropic.com";
/// Messages endpoint, relative to [`BASE_URL`].
pub const CHAT_URL: &str = "v1/messages";
/// Value sent in the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";
/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying [`API_VERSION`].
pub const API_VERSION_HEADER: &str = "anthropic-version";
/// `max_tokens` is mandatory on this API; used when the caller sets none.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
