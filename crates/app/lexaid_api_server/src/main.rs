//! Lexaid API server binary.
//!
//! Serves `POST /chat` and `GET /`, relaying chat messages to the Anthropic
//! Messages API through one shared client.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use lexaid_api::config::DEFAULT_MAX_BODY_BYTES;
use lexaid_core::config::{
    ANTHROPIC_VERSION, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
    UpstreamConfig,
};
use lexaid_core::llm::anthropic::AnthropicClient;
use lexaid_core::relay::Relay;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "lexaid_api_server", about = "Lexaid legal assistant chat relay", version)]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Anthropic API key. Without it the server starts but `/chat` fails.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    anthropic_api_key: Option<String>,

    /// Anthropic API base URL.
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    anthropic_base_url: String,

    /// Upstream model identifier.
    #[arg(long, env = "LEXAID_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum output tokens per reply.
    #[arg(long, env = "LEXAID_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Largest accepted `/chat` request body, in bytes.
    #[arg(long, env = "LEXAID_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Timeout for one upstream call, in seconds.
    #[arg(long, env = "LEXAID_UPSTREAM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    upstream_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lexaid_api=debug,lexaid_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    info!(version = lexaid_core::version(), port = args.port, "starting lexaid_api_server");

    let upstream = UpstreamConfig {
        base_url: args.anthropic_base_url,
        api_key: args.anthropic_api_key.filter(|key| !key.trim().is_empty()),
        model: args.model,
        max_tokens: args.max_tokens,
        anthropic_version: ANTHROPIC_VERSION.into(),
        timeout: Duration::from_secs(args.upstream_timeout_secs),
    };

    if upstream.api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; /chat requests will fail");
    }

    let client = AnthropicClient::new(&upstream)?;
    info!(
        endpoint = %client.endpoint(),
        model = %upstream.model,
        max_tokens = upstream.max_tokens,
        "upstream client ready"
    );

    let config = lexaid_api::config::ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        max_body_bytes: args.max_body_bytes,
        upstream: upstream.clone(),
    };

    let state = lexaid_api::AppState {
        relay: Relay::new(Arc::new(client), &upstream),
        config: config.clone(),
    };

    let app = lexaid_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
