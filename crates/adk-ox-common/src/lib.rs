#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Shared wire types and HTTP plumbing for the adk-ox vendor adapters
//!
//! Holds the OpenAI-compatible chat-completion wire format (used by every
//! OpenAI-style vendor) plus the request builder and SSE parser the transport uses.

pub mod error;
pub mod openai_format;
pub mod request_builder;
pub mod streaming;

pub use error::CommonRequestError;
pub use openai_format::*;
pub use request_builder::{AuthMethod, RequestBuilder, RequestConfig};
pub use streaming::SseParser;

/// Re-export common types for convenience
pub use futures_util::stream::BoxStream;
