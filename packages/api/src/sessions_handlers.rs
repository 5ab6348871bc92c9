// ABOUTME: HTTP request handlers for learning sessions
// ABOUTME: Create, list, read, partially update, and delete sessions owned by the caller

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use realworlded_core::{Mode, SessionStatus, Stage};
use realworlded_storage::{SessionCreateInput, SessionUpdateInput};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::auth::CurrentUser;
use super::response::{created, ok};
use crate::{ApiJson, ApiResult, AppError, AppState};

/// Request body for starting a session; `mode` is parsed by hand so bad values get a 400
#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub mode: String,
    pub subject: Option<String>,
    pub application: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
}

/// List the caller's sessions, newest first
pub async fn list_sessions(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<impl IntoResponse> {
    let sessions = state.db.session_storage.list_sessions(current.id).await?;
    Ok(ok(sessions))
}

/// Start a new session in the requested mode
pub async fn create_session(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(request): ApiJson<CreateSessionRequest>,
) -> ApiResult<impl IntoResponse> {
    let mode: Mode = request.mode.trim().parse()?;

    let input = SessionCreateInput {
        mode,
        subject: request.subject,
        application: request.application,
        business_type: request.business_type,
        location: request.location,
    };

    let session = state
        .db
        .session_storage
        .create_session(current.id, input)
        .await?;

    info!("User {} started {} session {}", current.id, mode, session.id);
    Ok(created(session))
}

/// Get a single session by ID
pub async fn get_session(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(session_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let session = state
        .db
        .session_storage
        .get_session(current.id, session_id)
        .await?
        .ok_or_else(AppError::session_not_found)?;

    Ok(ok(session))
}

/// Request body for a partial update; absent and null fields are left unchanged
#[derive(Deserialize, Default)]
pub struct UpdateSessionRequest {
    pub status: Option<String>,
    pub subject: Option<String>,
    pub application: Option<String>,
    pub project_idea: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub business_idea: Option<String>,
    pub current_stage: Option<String>,
    pub metadata: Option<Value>,
}

impl UpdateSessionRequest {
    fn into_input(self) -> ApiResult<SessionUpdateInput> {
        let status = self
            .status
            .map(|s| s.trim().parse::<SessionStatus>())
            .transpose()?;
        let current_stage = self
            .current_stage
            .map(|s| s.trim().parse::<Stage>())
            .transpose()?;

        Ok(SessionUpdateInput {
            status,
            subject: self.subject,
            application: self.application,
            project_idea: self.project_idea,
            business_type: self.business_type,
            location: self.location,
            business_idea: self.business_idea,
            current_stage,
            metadata: self.metadata.filter(|m| !m.is_null()),
        })
    }
}

/// Update the provided fields of a session
pub async fn update_session(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(session_id): Path<i64>,
    ApiJson(request): ApiJson<UpdateSessionRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = request.into_input()?;

    let session = state
        .db
        .session_storage
        .update_session(current.id, session_id, input)
        .await?
        .ok_or_else(AppError::session_not_found)?;

    Ok(ok(session))
}

/// Delete a session together with its messages and reports
pub async fn delete_session(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(session_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .db
        .session_storage
        .delete_session(current.id, session_id)
        .await?;

    if !deleted {
        return Err(AppError::session_not_found());
    }

    info!("User {} deleted session {}", current.id, session_id);
    Ok(StatusCode::NO_CONTENT)
}
