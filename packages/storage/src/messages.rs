// ABOUTME: Chat message storage using SQLite
// ABOUTME: Append-only transcript of user and agent turns per session

use chrono::{DateTime, Utc};
use realworlded_core::{AgentType, MessageRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::{json_column, StorageError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub session_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub agent_type: Option<AgentType>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub session_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub agent_type: Option<AgentType>,
    pub metadata: Option<Value>,
}

impl NewMessage {
    pub fn from_user(session_id: i64, content: impl Into<String>) -> Self {
        Self {
            session_id,
            role: MessageRole::User,
            content: content.into(),
            agent_type: None,
            metadata: None,
        }
    }

    /// Message authored by an agent; the role follows from the agent type
    pub fn from_agent(session_id: i64, agent: AgentType, content: impl Into<String>) -> Self {
        Self {
            session_id,
            role: agent.message_role(),
            content: content.into(),
            agent_type: Some(agent),
            metadata: None,
        }
    }
}

pub struct MessageStorage {
    pool: SqlitePool,
}

impl MessageStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add_message(&self, input: NewMessage) -> Result<Message, StorageError> {
        debug!("Adding {} message to session {}", input.role, input.session_id);

        let metadata = input
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let row = sqlx::query(
            r#"
            INSERT INTO messages (session_id, role, content, agent_type, metadata)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(input.session_id)
        .bind(input.role.as_str())
        .bind(&input.content)
        .bind(input.agent_type.map(|a| a.as_str()))
        .bind(metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.row_to_message(&row)
    }

    /// Full transcript of a session in chronological order
    pub async fn list_messages(&self, session_id: i64) -> Result<Vec<Message>, StorageError> {
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE session_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_message(row)).collect()
    }

    pub async fn count_messages(&self, session_id: i64) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(count)
    }

    fn row_to_message(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Message, StorageError> {
        let agent_type = row
            .try_get::<Option<String>, _>("agent_type")?
            .map(|s| s.parse())
            .transpose()?;

        Ok(Message {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get::<String, _>("role")?.parse()?,
            content: row.try_get("content")?,
            agent_type,
            metadata: json_column(row.try_get("metadata")?)?,
            created_at: row.try_get("created_at")?,
        })
    }
}
