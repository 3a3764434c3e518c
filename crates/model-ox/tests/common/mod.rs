#![allow(dead_code)]

use std::sync::Mutex;

use adk_ox::{Content, LlmRequest};
use adk_ox_common::{BoxStream, CommonRequestError};
use async_trait::async_trait;
use futures_util::stream;
use model_ox::ChatTransport;
use serde_json::Value;

/// What the mock answers with.
pub enum Reply {
    Body(Value),
    Events(Vec<Value>),
    Fail(u16, &'static str),
}

/// In-memory transport recording every request it receives.
pub struct MockTransport {
    reply: Mutex<Option<Reply>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Value {
        self.requests().pop().unwrap().1
    }

    fn take(&self, path: &str, body: Value) -> Reply {
        self.requests.lock().unwrap().push((path.to_string(), body));
        self.reply.lock().unwrap().take().expect("mock transport called twice")
    }
}

fn api_error(status: u16, message: &str) -> CommonRequestError {
    CommonRequestError::Api {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(&self, path: &str, body: Value) -> Result<Value, CommonRequestError> {
        match self.take(path, body) {
            Reply::Body(value) => Ok(value),
            Reply::Fail(status, message) => Err(api_error(status, message)),
            Reply::Events(_) => panic!("streaming reply for a non-streaming call"),
        }
    }

    fn stream(
        &self,
        path: &str,
        body: Value,
    ) -> BoxStream<'static, Result<Value, CommonRequestError>> {
        let items: Vec<Result<Value, CommonRequestError>> = match self.take(path, body) {
            Reply::Events(events) => events.into_iter().map(Ok).collect(),
            Reply::Fail(status, message) => vec![Err(api_error(status, message))],
            Reply::Body(_) => panic!("single-shot reply for a streaming call"),
        };
        Box::pin(stream::iter(items))
    }
}

pub fn user_request(text: &str) -> LlmRequest {
    LlmRequest::builder().contents(vec![Content::text(text)]).build()
}
