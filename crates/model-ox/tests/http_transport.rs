use std::collections::BTreeMap;

use adk_ox_common::CommonRequestError;
use futures_util::StreamExt;
use model_ox::{ChatTransport, HttpTransport, ProviderConfig, ProviderKind, ResolvedConfig};
use serde_json::json;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
    time::{Duration, sleep},
};

/// Reads one HTTP request and returns its lowercased head and its body.
async fn read_request(socket: &mut TcpStream) -> (String, String) {
    let mut buffer = Vec::new();
    loop {
        let mut chunk = [0u8; 1024];
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request head");
        buffer.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            let header_end = pos + 4;
            let head = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length: "))
                .and_then(|len| len.trim().parse::<usize>().ok())
                .unwrap_or(0);

            let mut body = buffer[header_end..].to_vec();
            while body.len() < content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                body.extend_from_slice(&chunk[..n]);
            }
            return (head, String::from_utf8(body).unwrap());
        }
    }
}

/// Serves a single request, writing each of `writes` with a short pause between them.
async fn serve_once(writes: Vec<String>) -> (String, JoinHandle<(String, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        for write in writes {
            socket.write_all(write.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            sleep(Duration::from_millis(20)).await;
        }
        request
    });

    (format!("http://{addr}"), server)
}

fn json_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn chunked(data: &str) -> String {
    format!("{:x}\r\n{data}\r\n", data.len())
}

fn resolved(kind: ProviderKind, base_url: &str) -> ResolvedConfig {
    ProviderConfig::builder()
        .kind(kind)
        .api_key("test-key")
        .base_url(base_url)
        .headers(BTreeMap::from([("x-trace".to_string(), "abc".to_string())]))
        .build()
        .resolve_with(|_| None)
        .unwrap()
}

#[tokio::test]
async fn test_send_posts_json_with_bearer_auth() {
    let (base_url, server) = serve_once(vec![json_response(
        "200 OK",
        r#"{"choices": [{"message": {"content": "pong"}}]}"#,
    )])
    .await;
    let transport = HttpTransport::new(&resolved(
        ProviderKind::OpenAiCompatible,
        &format!("{base_url}/v1/"),
    ));

    let value = transport
        .send("chat/completions", json!({"model": "m", "messages": []}))
        .await
        .unwrap();

    assert_eq!(value["choices"][0]["message"]["content"], "pong");
    let (head, body) = server.await.unwrap();
    assert!(head.starts_with("post /v1/chat/completions http/1.1"));
    assert!(head.contains("authorization: bearer test-key"));
    assert!(head.contains("x-trace: abc"));
    assert!(head.contains("content-type: application/json"));
    let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(sent["model"], "m");
}

#[tokio::test]
async fn test_error_status_carries_vendor_message() {
    let (base_url, server) = serve_once(vec![json_response(
        "429 Too Many Requests",
        r#"{"error": {"type": "rate_limit_error", "message": "Slow down"}}"#,
    )])
    .await;
    let transport = HttpTransport::new(&resolved(ProviderKind::OpenAiCompatible, &base_url));

    let err = transport.send("chat/completions", json!({})).await.unwrap_err();

    assert!(matches!(
        err,
        CommonRequestError::Api { status: 429, ref message } if message == "Slow down"
    ));
    server.await.unwrap();
}

#[tokio::test]
async fn test_stream_survives_split_events_with_api_key_auth() {
    let head = "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ntransfer-encoding: chunked\r\n\r\n";
    let (base_url, server) = serve_once(vec![
        head.to_string(),
        chunked("event: content_block_delta\ndata: {\"type\":\"content_block_delta\",\"index\":0,"),
        chunked("\"delta\":{\"type\":\"text_delta\",\"text\":\"Hi\"}}\n\n"),
        chunked("event: message_stop\ndata: {\"type\":\"message_stop\"}\n\n"),
        "0\r\n\r\n".to_string(),
    ])
    .await;
    let transport = HttpTransport::new(&resolved(ProviderKind::Anthropic, &base_url));

    let events: Vec<_> = transport
        .stream("v1/messages", json!({"model": "claude", "messages": [], "max_tokens": 16}))
        .collect()
        .await;

    let events: Vec<_> = events.into_iter().map(Result::unwrap).collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["delta"]["text"], "Hi");
    assert_eq!(events[1]["type"], "message_stop");

    let (head, body) = server.await.unwrap();
    assert!(head.contains("x-api-key: test-key"));
    assert!(head.contains("anthropic-version: 2023-06-01"));
    assert!(!head.contains("authorization"));
    let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(sent["stream"], true);
}
