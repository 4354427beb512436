//! # lexaid_api
//!
//! HTTP API library for Lexaid.

pub mod config;
pub mod error;
pub mod handlers;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use lexaid_core::relay::Relay;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, hello};

/// Route paths.
pub mod routes {
    pub const GET_ROOT: &str = "/";
    pub const POST_CHAT: &str = "/chat";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Relay over the one long-lived upstream client.
    pub relay: Relay,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Base64 images routinely exceed axum's 2 MB default.
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route(routes::GET_ROOT, get(hello::root))
        .route(
            routes::POST_CHAT,
            post(chat::chat_handler).layer(body_limit),
        )
        .layer(cors)
        .with_state(state)
}
