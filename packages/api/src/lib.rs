// ABOUTME: HTTP API layer for RealWorldEd providing REST endpoints and routing
// ABOUTME: Integration layer over storage, security, and the persona agents

use axum::{
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod auth_handlers;
pub mod chat_handlers;
pub mod error;
pub mod evaluation_handlers;
pub mod extract;
pub mod response;
pub mod sessions_handlers;
pub mod state;

pub use error::{ApiResult, AppError};
pub use extract::ApiJson;
pub use response::ApiResponse;
pub use state::AppState;

/// Creates the auth API router (nested under /api/v1/auth)
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth_handlers::signup))
        .route("/login", post(auth_handlers::login))
        .route("/me", get(auth_handlers::me))
}

/// Creates the sessions API router (nested under /api/v1/sessions)
pub fn create_sessions_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sessions_handlers::list_sessions).post(sessions_handlers::create_session),
        )
        .route(
            "/{session_id}",
            get(sessions_handlers::get_session)
                .patch(sessions_handlers::update_session)
                .delete(sessions_handlers::delete_session),
        )
}

/// Creates the chat API router (nested under /api/v1/chat)
pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/", post(chat_handlers::send_message))
        .route("/{session_id}/messages", get(chat_handlers::list_messages))
        .route("/scenario/{session_id}", post(chat_handlers::generate_scenario))
}

/// Creates the evaluation API router (nested under /api/v1/evaluation)
pub fn create_evaluation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(evaluation_handlers::evaluate_session))
        .route("/reports", get(evaluation_handlers::list_reports))
        .route("/reports/{report_id}", get(evaluation_handlers::get_report))
        .route(
            "/session/{session_id}/report",
            get(evaluation_handlers::get_session_report),
        )
}

/// All versioned API routes under `/api/v1`
pub fn create_api_router() -> Router<AppState> {
    let v1 = Router::new()
        .nest("/auth", create_auth_router())
        .nest("/sessions", create_sessions_router())
        .nest("/chat", create_chat_router())
        .nest("/evaluation", create_evaluation_router());

    Router::new().nest("/api/v1", v1)
}
