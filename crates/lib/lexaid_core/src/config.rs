//! Upstream model configuration.
//!
//! Anthropic endpoint, credential and model settings. The defaults below are
//! the values used when nothing is overridden on the command line or in the
//! environment.

use std::time::Duration;

/// Upstream model identifier.
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
/// Maximum output tokens per reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
/// Anthropic API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
/// Value sent in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Network timeout for one upstream call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the upstream chat-completion provider.
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Base URL; `/v1/messages` is appended.
    pub base_url: String,
    /// API key. `None` lets the server start but every relay call fails.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Output token budget sent with every request.
    pub max_tokens: u32,
    /// `anthropic-version` header value.
    pub anthropic_version: String,
    /// Whole-request timeout for the upstream call.
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            anthropic_version: ANTHROPIC_VERSION.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Hand-written so the API key never reaches the logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("anthropic_version", &self.anthropic_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}
