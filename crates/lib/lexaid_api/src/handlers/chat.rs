//! Chat request handler.

use axum::Json;
use axum::extract::State;
use lexaid_core::relay::{ChatRequest, ChatResponse};
use tracing::{error, info};

use crate::AppState;
use crate::error::AppResult;

/// `POST /chat`: relay one message to the model and return its reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let context_len = body.context_len();
    let has_image = body.image().is_some();

    match state.relay.handle(body).await {
        Ok(resp) => {
            info!(context_len, has_image, "chat relayed");
            Ok(Json(resp))
        }
        Err(e) => {
            error!(context_len, has_image, error = %e, "chat relay failed");
            Err(e.into())
        }
    }
}
