//! Demo upload endpoint
//!
//! POST /upload-demo replaces the catalog file with the request body. Meant
//! for local seeding; there is no merge and no authentication.

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use tracing::{error, info};

use super::ApiError;
use crate::AppState;

const NEED_MATCHES: &str = "Need matches array";

/// POST /upload-demo
pub async fn upload_demo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let doc: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest(NEED_MATCHES.to_string()))?;

    if !doc.get("matches").is_some_and(is_truthy) {
        return Err(ApiError::BadRequest(NEED_MATCHES.to_string()));
    }

    state.store.write(&doc).await.map_err(|e| {
        error!("Demo upload failed: {}", e);
        ApiError::from(e)
    })?;

    info!("Demo catalog uploaded to {}", state.store.path().display());
    Ok(Json(json!({ "ok": true })))
}

/// Loose truthiness: null, false, zero and "" are rejected; arrays and
/// objects are accepted even when empty
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
