#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Framework-level conversation types
//!
//! These are the request/response shapes the host agent framework speaks. Every
//! vendor adapter converts to and from them; none of them know about any vendor.

pub mod content;
pub mod request;
pub mod response;

pub use content::{Content, FunctionCall, FunctionResponse, Part, Role};
pub use request::{
    FunctionDeclaration, GenerateContentConfig, LlmRequest, SystemInstruction, ToolGroup,
};
pub use response::{LlmResponse, UsageMetadata};
