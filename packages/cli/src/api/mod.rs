// ABOUTME: Unversioned service routes mounted next to /api/v1
// ABOUTME: Welcome banner and health check

use axum::{routing::get, Router};

pub mod health;

pub fn create_service_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
}
