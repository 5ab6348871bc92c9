// ABOUTME: Cross-cutting HTTP middleware for the server
// ABOUTME: Converts handler panics into sanitized JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;
use uuid::Uuid;

type PanicHandler = fn(Box<dyn std::any::Any + Send + 'static>) -> Response;

/// Create a panic handler that returns consistent error responses
pub fn create_panic_handler() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let panic_message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic occurred"
    };

    error!(
        request_id = %request_id,
        panic_message = %panic_message,
        "Server panic occurred"
    );

    let body = json!({
        "success": false,
        "error": {
            "code": "INTERNAL_ERROR",
            "message": "An internal server error occurred"
        },
        "request_id": request_id
    });

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_panic_handler_response_format() {
        let response = handle_panic(Box::new("secret state: 42".to_string()));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal server error occurred");
        assert!(body["request_id"].is_string());
        assert!(!body.to_string().contains("secret state"));
    }
}
