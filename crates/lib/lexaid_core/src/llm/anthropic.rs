//! Anthropic Messages API provider.
//!
//! Calls `POST {base_url}/v1/messages` once per request. No retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{ChatModel, LlmError, MessagesRequest, MessagesResponse};
use crate::config::UpstreamConfig;

const MESSAGES_PATH: &str = "v1/messages";

/// Error envelope returned by the Anthropic API on non-2xx responses.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Long-lived Anthropic client. Build once at startup and share.
pub struct AnthropicClient {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
    version: String,
}

impl AnthropicClient {
    /// Builds the HTTP client and resolves the messages endpoint.
    pub fn new(config: &UpstreamConfig) -> Result<Self, LlmError> {
        let endpoint = messages_endpoint(&config.base_url)?;
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            version: config.anthropic_version.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatModel for AnthropicClient {
    async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Config("ANTHROPIC_API_KEY is not configured".into()))?;

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending upstream request"
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("x-api-key", api_key)
            .header("anthropic-version", self.version.as_str())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            warn!(status = status.as_u16(), "upstream returned an error");
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message: upstream_error_message(&body),
            });
        }

        resp.json::<MessagesResponse>()
            .await
            .map_err(|e| LlmError::Malformed(e.to_string()))
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

/// Joins `v1/messages` onto the base URL, keeping any path prefix.
fn messages_endpoint(base_url: &str) -> Result<Url, LlmError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|u| u.join(MESSAGES_PATH))
        .map_err(|e| LlmError::Config(format!("Invalid upstream base URL '{base_url}': {e}")))
}

/// Extracts `"<type>: <message>"` from an error envelope, else returns the raw body.
fn upstream_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("{}: {}", envelope.error.kind, envelope.error.message),
        Err(_) if body.trim().is_empty() => "<no body>".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
