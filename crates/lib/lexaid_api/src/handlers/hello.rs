//! Root endpoint: liveness check.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// `GET /`: static greeting.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello Wizzorld.".into(),
    })
}
