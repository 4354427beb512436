//! Shared fixtures: fake upstream models and a request helper.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use lexaid_api::AppState;
use lexaid_api::config::{ApiConfig, DEFAULT_MAX_BODY_BYTES};
use lexaid_core::config::UpstreamConfig;
use lexaid_core::llm::{ChatModel, LlmError, MessagesRequest, MessagesResponse, ReplyBlock};
use lexaid_core::relay::Relay;
use tower::ServiceExt;

/// Answers every request with fixed text and keeps every request it saw.
#[derive(Default)]
pub struct RecordingModel {
    pub reply: String,
    pub seen: Mutex<Vec<MessagesRequest>>,
}

impl RecordingModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: text.into(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn last_request(&self) -> MessagesRequest {
        self.seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no upstream request recorded")
    }
}

#[async_trait]
impl ChatModel for RecordingModel {
    async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, LlmError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(MessagesResponse {
            id: Some("msg_fake".into()),
            model: Some(request.model.clone()),
            content: vec![ReplyBlock {
                kind: "text".into(),
                text: Some(self.reply.clone()),
            }],
            stop_reason: Some("end_turn".into()),
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Fails every request the way an unavailable provider would.
pub struct FailingModel;

#[async_trait]
impl ChatModel for FailingModel {
    async fn create_message(
        &self,
        _request: &MessagesRequest,
    ) -> Result<MessagesResponse, LlmError> {
        Err(LlmError::Upstream {
            status: 529,
            message: "overloaded_error: Overloaded".into(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub fn app_with(model: Arc<dyn ChatModel>) -> Router {
    app_with_body_limit(model, DEFAULT_MAX_BODY_BYTES)
}

pub fn app_with_body_limit(model: Arc<dyn ChatModel>, max_body_bytes: usize) -> Router {
    let upstream = UpstreamConfig::default();
    let state = AppState {
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            max_body_bytes,
            upstream: upstream.clone(),
        },
        relay: Relay::new(model, &upstream),
    };
    lexaid_api::router(state)
}

/// Sends one request and returns the status plus the parsed JSON body.
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn post_chat(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
