//! Tests for accesspipe-llm: conversation types and reply normalization

use accesspipe_llm::*;
use serde_json::json;

// ===========================================================================
// CompletionRequest
// ===========================================================================

#[test]
fn completion_request_pins_temperature_to_zero() {
    let req = CompletionRequest::new("claude-haiku-4-5-20251001", "be terse");
    assert_eq!(req.temperature, 0.0);
    assert_eq!(req.system, "be terse");
    assert!(req.messages.is_empty());
    assert_eq!(req.max_tokens, 8192);
}

// ===========================================================================
// ChatTurn
// ===========================================================================

#[test]
fn chat_turn_constructors() {
    let u = ChatTurn::user("hello");
    assert_eq!(u.role, Role::User);
    assert_eq!(u.content, "hello");

    let a = ChatTurn::assistant("hi");
    assert_eq!(a.role, Role::Assistant);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
    assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
}

#[test]
fn chat_turn_serde_round_trip() {
    let turn = ChatTurn::user("check this markup");
    let json = serde_json::to_string(&turn).unwrap();
    let back: ChatTurn = serde_json::from_str(&json).unwrap();
    assert_eq!(back, turn);
}

// ===========================================================================
// normalize_reply - the three known shapes, then the failure case
// ===========================================================================

#[test]
fn normalize_plain_string() {
    let reply = json!("X");
    assert_eq!(normalize_reply(&reply).unwrap(), "X");
}

#[test]
fn normalize_messages_response() {
    let reply = json!({
        "id": "msg_01",
        "role": "assistant",
        "content": [{"type": "text", "text": "Y"}],
        "stop_reason": "end_turn"
    });
    assert_eq!(normalize_reply(&reply).unwrap(), "Y");
}

#[test]
fn normalize_joins_multiple_text_blocks() {
    let reply = json!({
        "content": [
            {"type": "text", "text": "<html>"},
            {"type": "text", "text": "</html>"}
        ]
    });
    assert_eq!(normalize_reply(&reply).unwrap(), "<html></html>");
}

#[test]
fn normalize_bare_text_field() {
    let reply = json!({"text": "Y"});
    assert_eq!(normalize_reply(&reply).unwrap(), "Y");
}

#[test]
fn normalize_rejects_unknown_shape() {
    let reply = json!({"choices": [{"message": {"content": "Z"}}]});
    match normalize_reply(&reply) {
        Err(ModelError::MalformedReply(detail)) => assert!(detail.contains("choices")),
        other => panic!("expected MalformedReply, got {:?}", other),
    }
}

#[test]
fn normalize_rejects_empty_content_array() {
    let reply = json!({"content": []});
    assert!(matches!(
        normalize_reply(&reply),
        Err(ModelError::MalformedReply(_))
    ));
}

#[test]
fn normalize_rejects_non_text_blocks_only() {
    let reply = json!({"content": [{"type": "tool_use", "id": "t1", "name": "x"}]});
    assert!(matches!(
        normalize_reply(&reply),
        Err(ModelError::MalformedReply(_))
    ));
}

// ===========================================================================
// AnthropicClient construction
// ===========================================================================

#[test]
fn anthropic_client_name() {
    let client = AnthropicClient::new("sk-test", 120);
    assert_eq!(client.name(), "anthropic");
}
