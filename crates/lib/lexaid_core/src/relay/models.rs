//! Inbound chat request and outbound response envelope.

use serde::{Deserialize, Serialize};

use super::clock;
use super::persona;

/// A prior conversation message, forwarded upstream without validation.
pub type ContextMessage = serde_json::Map<String, serde_json::Value>;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns in upstream-compatible shape. Absent and `null` mean empty.
    #[serde(default)]
    pub context: Option<Vec<ContextMessage>>,
    /// Accepted for client compatibility; not used when relaying.
    #[serde(default, alias = "userInfo")]
    pub user_info: Option<serde_json::Map<String, serde_json::Value>>,
    /// Base64-encoded JPEG. An empty string counts as absent.
    #[serde(default)]
    pub image: Option<String>,
}

impl ChatRequest {
    /// Text-only request with no history.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            user_info: None,
            image: None,
        }
    }

    /// The image payload, if one was supplied and is non-empty.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|data| !data.is_empty())
    }

    pub fn context_len(&self) -> usize {
        self.context.as_ref().map_or(0, Vec::len)
    }
}

/// Discriminator of [`ReplyBody`]; only text replies exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    Text,
}

/// The model's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyBody {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ReplyKind,
}

/// Body of a successful `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: ReplyBody,
    pub suggested_actions: Vec<String>,
    /// ISO-8601, generated when the response is built.
    pub timestamp: String,
}

impl ChatResponse {
    /// Wraps reply text in the fixed envelope, stamped now.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            response: ReplyBody {
                text: text.into(),
                kind: ReplyKind::Text,
            },
            suggested_actions: persona::suggested_actions(),
            timestamp: clock::response_timestamp(),
        }
    }
}
