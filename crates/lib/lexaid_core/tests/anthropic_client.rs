//! Integration test: point the Anthropic client at a local axum stand-in and
//! check the wire request, reply unwrapping and failure mapping.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use lexaid_core::config::UpstreamConfig;
use lexaid_core::llm::LlmError;
use lexaid_core::llm::anthropic::AnthropicClient;
use lexaid_core::relay::{ChatRequest, Relay, RelayError, SUGGESTED_ACTIONS, SYSTEM_PROMPT};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Captured {
    headers: Arc<Mutex<Option<HeaderMap>>>,
    body: Arc<Mutex<Option<Value>>>,
}

async fn reply_ok(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    *captured.headers.lock().unwrap() = Some(headers);
    *captured.body.lock().unwrap() = Some(body);
    Json(json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-sonnet-20240229",
        "content": [
            {"type": "text", "text": "Stay calm and keep your hands visible."},
            {"type": "text", "text": "This block is dropped."}
        ],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 42, "output_tokens": 9}
    }))
}

async fn reply_unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })),
    )
}

async fn reply_garbage() -> Json<Value> {
    Json(json!({"unexpected": true}))
}

async fn reply_slowly() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"content": [{"type": "text", "text": "too late"}]}))
}

async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn relay_for(base_url: String, timeout: Duration) -> Relay {
    let config = UpstreamConfig {
        base_url,
        api_key: Some("test-key".into()),
        timeout,
        ..UpstreamConfig::default()
    };
    let client = AnthropicClient::new(&config).expect("client");
    Relay::new(Arc::new(client), &config)
}

#[tokio::test]
async fn relay_sends_wire_request_and_uses_first_block() {
    let captured = Captured::default();
    let app = Router::new()
        .route("/v1/messages", post(reply_ok))
        .with_state(captured.clone());
    let relay = relay_for(spawn_upstream(app).await, Duration::from_secs(10));

    let request: ChatRequest = serde_json::from_value(json!({
        "message": "Describe this document",
        "context": [{"role": "user", "content": "Hello"}, {"role": "assistant", "content": "Hi"}],
        "image": "/9j/4AAQSkZJRgABAQ=="
    }))
    .unwrap();
    let resp = relay.handle(request).await.expect("relay");

    assert_eq!(resp.response.text, "Stay calm and keep your hands visible.");
    assert_eq!(resp.suggested_actions, SUGGESTED_ACTIONS.to_vec());

    let headers = captured.headers.lock().unwrap().clone().expect("headers");
    assert_eq!(headers["x-api-key"], "test-key");
    assert_eq!(headers["anthropic-version"], "2023-06-01");

    let body = captured.body.lock().unwrap().clone().expect("body");
    assert_eq!(body["model"], "claude-3-sonnet-20240229");
    assert_eq!(body["max_tokens"], 1024);
    assert_eq!(body["system"], SYSTEM_PROMPT);
    assert_eq!(
        body["messages"],
        json!([
            {"role": "user", "content": "Hello"},
            {"role": "assistant", "content": "Hi"},
            {
                "role": "user",
                "content": [
                    {
                        "type": "image",
                        "source": {
                            "type": "base64",
                            "media_type": "image/jpeg",
                            "data": "/9j/4AAQSkZJRgABAQ=="
                        }
                    },
                    {"type": "text", "text": "Describe this document"}
                ]
            }
        ])
    );
}

#[tokio::test]
async fn upstream_error_carries_status_and_message() {
    let app = Router::new().route("/v1/messages", post(reply_unauthorized));
    let relay = relay_for(spawn_upstream(app).await, Duration::from_secs(10));

    let err = relay.handle(ChatRequest::text("hi")).await.unwrap_err();
    match err {
        RelayError::Model(LlmError::Upstream { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "authentication_error: invalid x-api-key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_reply_is_reported() {
    let app = Router::new().route("/v1/messages", post(reply_garbage));
    let relay = relay_for(spawn_upstream(app).await, Duration::from_secs(10));

    let err = relay.handle(ChatRequest::text("hi")).await.unwrap_err();
    assert!(
        matches!(err, RelayError::Model(LlmError::Malformed(_))),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let app = Router::new().route("/v1/messages", post(reply_slowly));
    let relay = relay_for(spawn_upstream(app).await, Duration::from_millis(200));

    let err = relay.handle(ChatRequest::text("hi")).await.unwrap_err();
    match err {
        RelayError::Model(LlmError::Transport(e)) => assert!(e.is_timeout(), "{e}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let relay = relay_for(format!("http://{addr}"), Duration::from_secs(5));
    let err = relay.handle(ChatRequest::text("hi")).await.unwrap_err();
    assert!(
        matches!(err, RelayError::Model(LlmError::Transport(_))),
        "unexpected error: {err:?}"
    );
}
