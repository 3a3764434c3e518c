use anthropic_ox::{ContentBlock, ContentBlockDelta, StopReason, StreamEvent};
use serde_json::json;

#[test]
fn test_full_event_sequence_decodes() {
    let events: Vec<StreamEvent> = serde_json::from_value(json!([
        {"type": "message_start", "message": {"id": "msg_1", "type": "message", "role": "assistant", "content": []}},
        {"type": "content_block_start", "index": 0, "content_block": {"type": "text", "text": ""}},
        {"type": "ping"},
        {"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": "Hello"}},
        {"type": "content_block_stop", "index": 0},
        {"type": "content_block_start", "index": 1, "content_block": {"type": "tool_use", "id": "toolu_1", "name": "get_weather", "input": {}}},
        {"type": "content_block_delta", "index": 1, "delta": {"type": "input_json_delta", "partial_json": "{\"city\":"}},
        {"type": "content_block_delta", "index": 1, "delta": {"type": "input_json_delta", "partial_json": "\"Paris\"}"}},
        {"type": "content_block_stop", "index": 1},
        {"type": "message_delta", "delta": {"stop_reason": "tool_use"}, "usage": {"output_tokens": 20}},
        {"type": "message_stop"}
    ]))
    .unwrap();

    assert_eq!(events.len(), 11);
    assert!(matches!(events[0], StreamEvent::MessageStart { .. }));
    assert_eq!(
        events[5],
        StreamEvent::ContentBlockStart {
            index: 1,
            content_block: ContentBlock::tool_use("toolu_1", "get_weather", json!({})),
        }
    );
    assert_eq!(
        events[6],
        StreamEvent::ContentBlockDelta {
            index: 1,
            delta: ContentBlockDelta::InputJsonDelta {
                partial_json: "{\"city\":".to_string()
            },
        }
    );
    match &events[9] {
        StreamEvent::MessageDelta { delta, usage } => {
            assert_eq!(delta.stop_reason, Some(StopReason::ToolUse));
            assert_eq!(usage.map(|u| u.output_tokens), Some(20));
        }
        other => panic!("Expected MessageDelta, got {other:?}"),
    }
    assert_eq!(events[10], StreamEvent::MessageStop);
}

#[test]
fn test_error_event_decodes() {
    let event: StreamEvent = serde_json::from_value(json!({
        "type": "error",
        "error": {"type": "overloaded_error", "message": "Overloaded"}
    }))
    .unwrap();

    match event {
        StreamEvent::Error { error } => {
            assert_eq!(error.r#type, "overloaded_error");
            assert_eq!(error.message, "Overloaded");
        }
        other => panic!("Expected Error event, got {other:?}"),
    }
}

#[test]
fn test_future_event_kind_is_tolerated() {
    let event: StreamEvent =
        serde_json::from_value(json!({"type": "server_tool_progress", "index": 3})).unwrap();
    assert_eq!(event, StreamEvent::Unknown);
}
