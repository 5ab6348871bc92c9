// ABOUTME: Session type definitions
// ABOUTME: Session record plus create and partial-update inputs

use chrono::{DateTime, Utc};
use realworlded_core::{Mode, SessionContext, SessionStatus, Stage};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub mode: Mode,
    pub status: SessionStatus,
    pub subject: Option<String>,
    pub application: Option<String>,
    pub project_idea: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub business_idea: Option<String>,
    pub current_stage: Stage,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Prompt context for the persona agents
    pub fn context(&self) -> SessionContext {
        SessionContext {
            mode: self.mode,
            subject: self.subject.clone(),
            application: self.application.clone(),
            project_idea: self.project_idea.clone(),
            business_type: self.business_type.clone(),
            location: self.location.clone(),
            business_idea: self.business_idea.clone(),
            current_stage: Some(self.current_stage),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionCreateInput {
    pub mode: Mode,
    pub subject: Option<String>,
    pub application: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
}

impl SessionCreateInput {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            subject: None,
            application: None,
            business_type: None,
            location: None,
        }
    }
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct SessionUpdateInput {
    pub status: Option<SessionStatus>,
    pub subject: Option<String>,
    pub application: Option<String>,
    pub project_idea: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub business_idea: Option<String>,
    pub current_stage: Option<Stage>,
    pub metadata: Option<Value>,
}

impl SessionUpdateInput {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.subject.is_none()
            && self.application.is_none()
            && self.project_idea.is_none()
            && self.business_type.is_none()
            && self.location.is_none()
            && self.business_idea.is_none()
            && self.current_stage.is_none()
            && self.metadata.is_none()
    }
}
