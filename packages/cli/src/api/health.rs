use axum::Json;
use chrono::Utc;
use realworlded_core::constants::SERVICE_NAME;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {}", SERVICE_NAME),
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
