// ABOUTME: Domain enums and the session context handed to persona agents
// ABOUTME: Stored as snake_case text in SQLite and serialized the same way over JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Simulation track chosen when a session is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Education,
    Business,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Business => "business",
        }
    }
}

impl FromStr for Mode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "education" => Ok(Self::Education),
            "business" => Ok(Self::Business),
            _ => Err(ParseEnumError::new("mode", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            _ => Err(ParseEnumError::new("status", s)),
        }
    }
}

/// Progress marker of a session; decides which persona answers the next message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Started,
    SubjectSelected,
    ApplicationSelected,
    Guidance,
    Testing,
    BusinessSelected,
    Simulation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::SubjectSelected => "subject_selected",
            Self::ApplicationSelected => "application_selected",
            Self::Guidance => "guidance",
            Self::Testing => "testing",
            Self::BusinessSelected => "business_selected",
            Self::Simulation => "simulation",
        }
    }
}

impl FromStr for Stage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(Self::Started),
            "subject_selected" => Ok(Self::SubjectSelected),
            "application_selected" => Ok(Self::ApplicationSelected),
            "guidance" => Ok(Self::Guidance),
            "testing" => Ok(Self::Testing),
            "business_selected" => Ok(Self::BusinessSelected),
            "simulation" => Ok(Self::Simulation),
            _ => Err(ParseEnumError::new("stage", s)),
        }
    }
}

/// Author of a stored chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Mentor,
    Client,
    Evaluator,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Mentor => "mentor",
            Self::Client => "client",
            Self::Evaluator => "evaluator",
        }
    }

    /// Whether the message was written by one of the persona agents
    pub fn is_assistant(&self) -> bool {
        !matches!(self, Self::User)
    }
}

impl FromStr for MessageRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "mentor" => Ok(Self::Mentor),
            "client" => Ok(Self::Client),
            "evaluator" => Ok(Self::Evaluator),
            _ => Err(ParseEnumError::new("message role", s)),
        }
    }
}

/// Specific agent that produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    Mentor,
    Client,
    Evaluator,
    Scenario,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mentor => "mentor",
            Self::Client => "client",
            Self::Evaluator => "evaluator",
            Self::Scenario => "scenario",
        }
    }

    /// Role recorded on messages written by this agent
    pub fn message_role(&self) -> MessageRole {
        match self {
            Self::Mentor => MessageRole::Mentor,
            Self::Client | Self::Scenario => MessageRole::Client,
            Self::Evaluator => MessageRole::Evaluator,
        }
    }
}

impl FromStr for AgentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mentor" => Ok(Self::Mentor),
            "client" => Ok(Self::Client),
            "evaluator" => Ok(Self::Evaluator),
            "scenario" => Ok(Self::Scenario),
            _ => Err(ParseEnumError::new("agent type", s)),
        }
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_via_as_str!(Mode, SessionStatus, Stage, MessageRole, AgentType);

/// Snapshot of a session's scenario fields used to ground agent prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub mode: Mode,
    pub subject: Option<String>,
    pub application: Option<String>,
    pub project_idea: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub business_idea: Option<String>,
    pub current_stage: Option<Stage>,
}

impl SessionContext {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            subject: None,
            application: None,
            project_idea: None,
            business_type: None,
            location: None,
            business_idea: None,
            current_stage: None,
        }
    }

    /// Context fields in prompt order, with empty values dropped
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let optional = [
            ("subject", self.subject.as_deref()),
            ("application", self.application.as_deref()),
            ("project_idea", self.project_idea.as_deref()),
            ("business_type", self.business_type.as_deref()),
            ("location", self.location.as_deref()),
            ("business_idea", self.business_idea.as_deref()),
            ("current_stage", self.current_stage.as_ref().map(Stage::as_str)),
        ];

        std::iter::once(("mode", self.mode.as_str()))
            .chain(optional.into_iter().filter_map(|(key, value)| Some((key, value?))))
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key, value.to_string()))
            .collect()
    }
}
