//! Conversions for the message-blocks dialect

mod request;
mod response;
mod stream;

pub use request::{ConvertedRequest, build_chat_request, convert_request, convert_request_with};
pub use response::{convert_response, usage_metadata};
pub use stream::{AnthropicDialect, convert_event};
