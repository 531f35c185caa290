use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /api/health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "Healthy",
        "timestamp": Utc::now()
    }))
}
