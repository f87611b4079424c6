use axum::response::Json;
use serde_json::json;

pub async fn liveness() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok"
    }))
}
