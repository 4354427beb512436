//! Upstream model client: Anthropic Messages API wire types and transport.
//!
//! # Public API
//!
//! - [`ChatModel`]: the seam the relay calls; one long-lived implementation
//!   is shared by every request
//! - [`anthropic::AnthropicClient`]: `reqwest` implementation of [`ChatModel`]
//! - [`MessagesRequest`] / [`MessagesResponse`]: request and reply shapes

pub mod anthropic;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while talking to the upstream provider.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Upstream response parse error: {0}")]
    Malformed(String),
}

/// Conversation role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Where an image block's bytes come from. Only inline base64 is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSourceKind {
    Base64,
}

/// Inline image payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub kind: ImageSourceKind,
    pub media_type: String,
    pub data: String,
}

/// One typed unit of message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// A base64 image block with the given media type.
    pub fn base64_image(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        ContentBlock::Image {
            source: ImageSource {
                kind: ImageSourceKind::Base64,
                media_type: media_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Message content: a bare string or an ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// A message built by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

/// An entry of the outbound `messages` array.
///
/// Caller-supplied history is forwarded verbatim as [`MessageParam::Passthrough`];
/// the turn this service appends is [`MessageParam::Typed`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageParam {
    Typed(Message),
    Passthrough(serde_json::Map<String, serde_json::Value>),
}

/// Body of `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesRequest {
    pub system: String,
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<MessageParam>,
}

/// One content block of a reply. Non-text blocks (e.g. `tool_use`) carry no `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Reply of `POST /v1/messages`; fields this service does not read are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub content: Vec<ReplyBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

/// A chat-completion provider.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one request and returns the provider's reply.
    async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, LlmError>;

    /// Provider identifier for logging.
    fn name(&self) -> &str;
}
