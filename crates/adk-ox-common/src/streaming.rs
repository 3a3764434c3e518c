use bytes::Bytes;
use futures_util::{Stream, StreamExt, stream::BoxStream};
use serde::de::DeserializeOwned;

use crate::error::CommonRequestError;

/// Payload OpenAI-style vendors send as their last event.
const DONE_SENTINEL: &str = "[DONE]";

/// Pulls JSON events out of a server-sent-events body.
///
/// Only `data:` fields are read; `event:`, `id:` and comment lines are skipped.
/// Events may be split across any number of network chunks.
pub struct SseParser {
    /// Raw body chunks
    bytes: BoxStream<'static, Result<Bytes, reqwest::Error>>,
    /// Bytes not yet terminated by a newline
    pending: Vec<u8>,
    frame: Frame,
}

/// `data:` lines of the event being read.
#[derive(Debug, Default)]
struct Frame {
    data: Vec<String>,
}

impl Frame {
    /// Feeds one line (without its terminator); a blank line closes the event.
    fn feed(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.close();
        }
        if let Some(value) = line.strip_prefix("data:") {
            let value = value.strip_prefix(' ').unwrap_or(value);
            self.data.push(value.to_owned());
        }
        None
    }

    /// The joined payload, unless the event was empty or the done sentinel.
    fn close(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        let payload = self.data.join("\n");
        self.data.clear();
        (!payload.trim().is_empty() && payload != DONE_SENTINEL).then_some(payload)
    }
}

impl SseParser {
    #[must_use]
    pub fn new(response: reqwest::Response) -> Self {
        Self::from_byte_stream(response.bytes_stream())
    }

    pub fn from_byte_stream(
        stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            bytes: stream.boxed(),
            pending: Vec::new(),
            frame: Frame::default(),
        }
    }

    /// The next decoded event, or `None` once the body is exhausted.
    ///
    /// # Errors
    /// Transport failures, invalid UTF-8 and payloads that are not valid `T`.
    pub async fn next_event<T: DeserializeOwned>(
        &mut self,
    ) -> Result<Option<T>, CommonRequestError> {
        loop {
            while let Some(line) = self.next_line()? {
                if let Some(payload) = self.frame.feed(&line) {
                    return decode(&payload).map(Some);
                }
            }

            if let Some(chunk) = self.bytes.next().await {
                self.pending.extend_from_slice(&chunk?);
                continue;
            }

            // body ended without a trailing blank line
            if !self.pending.is_empty() {
                let rest = String::from_utf8(std::mem::take(&mut self.pending))?;
                if let Some(payload) = self.frame.feed(rest.trim_end_matches('\r')) {
                    return decode(&payload).map(Some);
                }
            }
            return self
                .frame
                .close()
                .map(|payload| decode(&payload))
                .transpose();
        }
    }

    /// Removes one complete line from the buffer, stripping `\n` or `\r\n`.
    fn next_line(&mut self) -> Result<Option<String>, CommonRequestError> {
        let Some(end) = self.pending.iter().position(|&b| b == b'\n') else {
            return Ok(None);
        };
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(String::from_utf8(line)?))
    }
}

fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, CommonRequestError> {
    serde_json::from_str(payload)
        .map_err(|e| CommonRequestError::InvalidEventData(format!("{e}: {payload}")))
}
