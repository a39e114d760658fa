use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/health
/// Returns service status plus which optional integrations are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": {
            "version": env!("CARGO_PKG_VERSION"),
            "hasHuggingFaceToken": state.config.has_huggingface_token(),
            "platform": std::env::consts::OS,
            "optimizer": state.optimizer.backend(),
        }
    }))
}
