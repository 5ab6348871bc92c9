// ABOUTME: HTTP request handlers for session evaluation and reports
// ABOUTME: Scores a finished conversation, stores the report, and completes the session

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use realworlded_agents::Evaluation;
use realworlded_core::constants::MIN_MESSAGES_FOR_EVALUATION;
use realworlded_storage::{Report, ReportCreateInput};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::auth::CurrentUser;
use super::chat_handlers::{owned_session, to_turns};
use super::response::ok;
use crate::{ApiJson, ApiResult, AppError, AppState};

/// Request body for evaluating a session
#[derive(Deserialize)]
pub struct EvaluationRequest {
    pub session_id: i64,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub report: Report,
    pub feedback_message: String,
}

/// Evaluate a session's conversation and store the resulting report
pub async fn evaluate_session(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(request): ApiJson<EvaluationRequest>,
) -> ApiResult<impl IntoResponse> {
    let session = owned_session(&state, current.id, request.session_id).await?;

    let message_count = state.db.message_storage.count_messages(session.id).await?;
    if message_count < MIN_MESSAGES_FOR_EVALUATION {
        return Err(AppError::bad_request(
            "Not enough conversation data to evaluate. Continue the session first.",
        ));
    }

    let messages = state.db.message_storage.list_messages(session.id).await?;
    let evaluation = state
        .agents
        .evaluator
        .evaluate(&session.context(), &to_turns(&messages))
        .await;

    let input = ReportCreateInput {
        technical_score: evaluation.technical_score,
        communication_score: evaluation.communication_score,
        creativity_score: evaluation.creativity_score,
        business_sense_score: evaluation.business_sense_score,
        overall_score: evaluation.overall_score,
        strengths: evaluation.strengths.clone(),
        improvements: evaluation.improvements.clone(),
        detailed_feedback: evaluation.detailed_feedback.clone(),
        evaluation_data: Some(evaluation.payload()),
    };

    let report = state
        .db
        .report_storage
        .create_report_and_complete_session(current.id, session.id, input)
        .await?;

    info!(
        "Evaluated session {} (report {}, fallback: {})",
        session.id,
        report.id,
        evaluation.is_fallback()
    );

    Ok(ok(EvaluationResponse {
        feedback_message: feedback_message(&evaluation),
        report,
    }))
}

/// All of the caller's reports, newest first
pub async fn list_reports(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<impl IntoResponse> {
    let reports = state.db.report_storage.list_reports(current.id).await?;
    Ok(ok(reports))
}

pub async fn get_report(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(report_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let report = state
        .db
        .report_storage
        .get_report(current.id, report_id)
        .await?
        .ok_or_else(|| AppError::not_found("Report not found"))?;

    Ok(ok(report))
}

/// Most recent report of a session
pub async fn get_session_report(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(session_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let session = owned_session(&state, current.id, session_id).await?;

    let report = state
        .db
        .report_storage
        .latest_report_for_session(current.id, session.id)
        .await?
        .ok_or_else(|| {
            AppError::not_found("No report found for this session. Complete the evaluation first.")
        })?;

    Ok(ok(report))
}

fn score(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.1}", v))
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable summary of an evaluation
fn feedback_message(evaluation: &Evaluation) -> String {
    format!(
        "Evaluation Complete!\n\n\
         Overall Score: {overall}/10\n\n\
         Detailed Scores:\n\
         - Technical: {technical}/10\n\
         - Communication: {communication}/10\n\
         - Creativity: {creativity}/10\n\
         - Business Sense: {business}/10\n\n\
         Strengths:\n{strengths}\n\n\
         Areas for Improvement:\n{improvements}\n\n\
         Feedback:\n{feedback}",
        overall = score(evaluation.overall_score),
        technical = score(evaluation.technical_score),
        communication = score(evaluation.communication_score),
        creativity = score(evaluation.creativity_score),
        business = score(evaluation.business_sense_score),
        strengths = bullet_list(&evaluation.strengths),
        improvements = bullet_list(&evaluation.improvements),
        feedback = evaluation.detailed_feedback.as_deref().unwrap_or(""),
    )
}
