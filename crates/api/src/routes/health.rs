//! Liveness endpoint shared by all three services.

use axum::Json;
use serde_json::{Value, json};

/// GET /health. Answers as long as the process is serving requests; it
/// does not probe the database or the peer services.
pub async fn check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
