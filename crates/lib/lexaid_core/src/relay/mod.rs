//! Chat relay: normalizes a chat request, calls the upstream model and
//! reshapes its reply.
//!
//! The outbound `messages` array is the caller's `context` verbatim, followed
//! by exactly one new user turn: plain text, or an image block followed by a
//! text block when an image is attached. Only the first content block of the
//! reply is used; additional blocks are discarded.

pub mod clock;
pub mod models;
pub mod persona;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::llm::{
    ChatModel, ContentBlock, LlmError, Message, MessageContent, MessageParam, MessagesRequest,
    MessagesResponse, Role,
};

pub use models::{ChatRequest, ChatResponse, ContextMessage, ReplyBody, ReplyKind};
pub use persona::{SUGGESTED_ACTIONS, SYSTEM_PROMPT};

/// Declared media type of attached images.
pub const IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Any failure while relaying a chat request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("Upstream reply contained no content blocks")]
    EmptyReply,

    #[error("Upstream reply's first content block is '{0}', not text")]
    NonTextReply(String),
}

/// Relays chat requests to one shared upstream model.
#[derive(Clone)]
pub struct Relay {
    model: Arc<dyn ChatModel>,
    model_id: String,
    max_tokens: u32,
}

impl Relay {
    /// Uses `config.model` and `config.max_tokens` for every request.
    pub fn new(model: Arc<dyn ChatModel>, config: &UpstreamConfig) -> Self {
        Self {
            model,
            model_id: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// Runs one relay transaction.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, RelayError> {
        debug!(
            provider = self.model.name(),
            context_len = request.context_len(),
            has_image = request.image().is_some(),
            has_user_info = request.user_info.is_some(),
            "relaying chat request"
        );

        let outbound = self.messages_request(request);
        let reply = self.model.create_message(&outbound).await?;
        let text = first_block_text(reply)?;

        Ok(ChatResponse::from_text(text))
    }

    /// Builds the upstream request body for a chat request.
    pub fn messages_request(&self, request: ChatRequest) -> MessagesRequest {
        MessagesRequest {
            system: SYSTEM_PROMPT.to_string(),
            model: self.model_id.clone(),
            max_tokens: self.max_tokens,
            messages: build_messages(request),
        }
    }
}

/// `context` followed by one new user turn for `message` (and `image`).
pub fn build_messages(request: ChatRequest) -> Vec<MessageParam> {
    let ChatRequest {
        message,
        context,
        image,
        ..
    } = request;

    let content = match image.filter(|data| !data.is_empty()) {
        Some(data) => MessageContent::Blocks(vec![
            ContentBlock::base64_image(IMAGE_MEDIA_TYPE, data),
            ContentBlock::text(message),
        ]),
        None => MessageContent::Text(message),
    };

    let mut messages: Vec<MessageParam> = context
        .unwrap_or_default()
        .into_iter()
        .map(MessageParam::Passthrough)
        .collect();
    messages.push(MessageParam::Typed(Message {
        role: Role::User,
        content,
    }));
    messages
}

/// Text of the reply's first content block.
fn first_block_text(reply: MessagesResponse) -> Result<String, RelayError> {
    let block_count = reply.content.len();
    let first = reply
        .content
        .into_iter()
        .next()
        .ok_or(RelayError::EmptyReply)?;

    if block_count > 1 {
        warn!(
            discarded = block_count - 1,
            "upstream reply had multiple content blocks; using the first"
        );
    }

    first.text.ok_or(RelayError::NonTextReply(first.kind))
}
