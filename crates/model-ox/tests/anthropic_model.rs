mod common;

use std::sync::Arc;

use adk_ox::{Content, FunctionCall, LlmRequest, LlmResponse, Part};
use common::{MockTransport, Reply, user_request};
use futures_util::StreamExt;
use model_ox::{AnthropicModel, Model};
use serde_json::json;

fn model(transport: &Arc<MockTransport>) -> AnthropicModel {
    AnthropicModel::builder()
        .transport(transport.clone())
        .model("claude-3-5-haiku-latest")
        .build()
}

async fn collect(
    transport: &Arc<MockTransport>,
    request: LlmRequest,
    stream: bool,
) -> Vec<LlmResponse> {
    model(transport).generate_content(request, stream).collect().await
}

#[tokio::test]
async fn test_single_shot_round_trip() {
    let transport = Arc::new(MockTransport::new(Reply::Body(json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-haiku-latest",
        "content": [
            {"type": "text", "text": "Checking."},
            {"type": "tool_use", "id": "toolu_1", "name": "lookup", "input": {"q": "rust"}}
        ],
        "stop_reason": "tool_use",
        "usage": {"input_tokens": 20, "output_tokens": 10}
    }))));

    let request = LlmRequest::builder()
        .contents(vec![
            Content::text("Look up rust"),
            Content::model([Part::text("")]),
        ])
        .build();
    let responses = collect(&transport, request, false).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(
        responses[0].parts(),
        [
            Part::text("Checking."),
            Part::FunctionCall(
                FunctionCall::new("lookup", json!({"q": "rust"})).with_id("toolu_1")
            ),
        ]
    );
    assert_eq!(responses[0].usage_metadata.unwrap().total_token_count, 30);

    let requests = transport.requests();
    assert_eq!(requests[0].0, "v1/messages");
    assert_eq!(
        requests[0].1,
        json!({
            "model": "claude-3-5-haiku-latest",
            "messages": [{"role": "user", "content": [{"type": "text", "text": "Look up rust"}]}],
            "max_tokens": 4096
        })
    );
}

#[tokio::test]
async fn test_streaming_event_sequence() {
    let transport = Arc::new(MockTransport::new(Reply::Events(vec![
        json!({"type": "message_start", "message": {"id": "msg_1", "role": "assistant", "content": []}}),
        json!({"type": "content_block_start", "index": 0, "content_block": {"type": "text", "text": ""}}),
        json!({"type": "ping"}),
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": "Hi "}}),
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": "there"}}),
        json!({"type": "content_block_stop", "index": 0}),
        json!({"type": "message_delta", "delta": {"stop_reason": "end_turn"}, "usage": {"output_tokens": 2}}),
        json!({"type": "message_stop"}),
    ])));

    let responses = collect(&transport, user_request("Hello"), true).await;

    let texts: Vec<_> = responses.iter().map(LlmResponse::text).collect();
    assert_eq!(texts, ["Hi ", "there", "Hi there"]);
    assert!(responses[..2].iter().all(LlmResponse::is_partial));
    assert!(responses[2].turn_complete);
    assert_eq!(transport.last_body()["stream"], true);
}

#[tokio::test]
async fn test_error_event_ends_stream() {
    let transport = Arc::new(MockTransport::new(Reply::Events(vec![
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": "partial"}}),
        json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}),
        json!({"type": "message_stop"}),
    ])));

    let responses = collect(&transport, user_request("Hello"), true).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].text(), "partial");
    assert_eq!(
        serde_json::to_value(&responses[1]).unwrap(),
        json!({
            "turnComplete": true,
            "errorCode": "ANTHROPIC_ERROR",
            "errorMessage": "Stream error (overloaded_error): Overloaded"
        })
    );
}

#[tokio::test]
async fn test_http_status_becomes_api_error_code() {
    let transport = Arc::new(MockTransport::new(Reply::Fail(401, "invalid x-api-key")));

    let responses = collect(&transport, user_request("Hello"), false).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].error_code.as_deref(), Some("API_ERROR_401"));
    assert_eq!(
        responses[0].error_message.as_deref(),
        Some("HTTP 401: invalid x-api-key")
    );
}

#[tokio::test]
async fn test_undecodable_event_uses_fallback_code() {
    let transport = Arc::new(MockTransport::new(Reply::Events(vec![json!({"no_type": true})])));

    let responses = collect(&transport, user_request("Hello"), true).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].error_code.as_deref(), Some("ANTHROPIC_ERROR"));
}
