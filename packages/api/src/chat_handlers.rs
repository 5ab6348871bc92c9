// ABOUTME: HTTP request handlers for the chat dispatcher
// ABOUTME: Routes messages to the persona for the session stage and applies stage transitions

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use realworlded_agents::{detect_transition, ChatTurn};
use realworlded_core::{validate_message, AgentType, Stage};
use realworlded_storage::{Message, NewMessage, Session};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::auth::CurrentUser;
use super::response::ok;
use crate::{ApiJson, ApiResult, AppError, AppState};

/// Request body for sending a chat message
#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionUpdate {
    pub current_stage: Stage,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub agent_type: AgentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_update: Option<SessionUpdate>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    pub scenario: String,
    pub message: &'static str,
}

pub(crate) fn to_turns(messages: &[Message]) -> Vec<ChatTurn> {
    messages
        .iter()
        .map(|m| ChatTurn::new(m.role, m.content.clone()))
        .collect()
}

pub(crate) async fn owned_session(
    state: &AppState,
    user_id: i64,
    session_id: i64,
) -> ApiResult<Session> {
    state
        .db
        .session_storage
        .get_session(user_id, session_id)
        .await?
        .ok_or_else(AppError::session_not_found)
}

/// Send a message and get the reply of the persona assigned to the current stage
pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(request): ApiJson<ChatRequest>,
) -> ApiResult<impl IntoResponse> {
    let session = owned_session(&state, current.id, request.session_id).await?;
    validate_message(&request.message)?;

    let messages = &state.db.message_storage;
    let history = to_turns(&messages.list_messages(session.id).await?);

    messages
        .add_message(NewMessage::from_user(session.id, request.message.clone()))
        .await?;

    let agent = state.agents.agent_for(session.current_stage);
    let context = session.context();
    let reply = agent.respond(&request.message, &context, &history).await;

    messages
        .add_message(NewMessage::from_agent(session.id, agent.kind(), reply.clone()))
        .await?;

    let session_update = match detect_transition(session.mode, session.current_stage, &request.message) {
        Some(next) => {
            state.db.session_storage.set_stage(session.id, next).await?;
            info!(
                "Session {} moved from {} to {}",
                session.id, session.current_stage, next
            );
            Some(SessionUpdate { current_stage: next })
        }
        None => None,
    };

    Ok(ok(ChatResponse {
        message: reply,
        agent_type: agent.kind(),
        session_update,
    }))
}

/// Full transcript of a session in creation order
pub async fn list_messages(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(session_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let session = owned_session(&state, current.id, session_id).await?;
    let messages = state.db.message_storage.list_messages(session.id).await?;
    Ok(ok(messages))
}

/// Generate a simulation scenario and move the session into the simulation stage
pub async fn generate_scenario(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(session_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let session = owned_session(&state, current.id, session_id).await?;

    let scenario = state.agents.scenarios.generate(&session.context()).await;

    state
        .db
        .message_storage
        .add_message(NewMessage::from_agent(
            session.id,
            AgentType::Scenario,
            scenario.clone(),
        ))
        .await?;
    state
        .db
        .session_storage
        .set_stage(session.id, Stage::Simulation)
        .await?;

    info!("Generated scenario for session {}", session.id);

    Ok(ok(ScenarioResponse {
        scenario,
        message: "New scenario generated. Respond to continue the simulation.",
    }))
}
