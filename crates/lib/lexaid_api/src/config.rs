//! API server configuration.

use lexaid_core::config::UpstreamConfig;

/// Largest accepted `POST /chat` body: room for several base64 images in
/// `context` at the upstream's 5 MB-per-image ceiling.
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// Request body limit for `POST /chat`, in bytes.
    pub max_body_bytes: usize,
    /// Upstream model provider settings.
    pub upstream: UpstreamConfig,
}
