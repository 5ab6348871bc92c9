// ABOUTME: Session storage layer using SQLite
// ABOUTME: Owner-scoped CRUD for sessions plus stage and status transitions

use chrono::Utc;
use realworlded_core::{SessionStatus, Stage};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use super::types::{Session, SessionCreateInput, SessionUpdateInput};
use crate::{json_column, StorageError};

pub struct SessionStorage {
    pool: SqlitePool,
}

impl SessionStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_session(
        &self,
        user_id: i64,
        input: SessionCreateInput,
    ) -> Result<Session, StorageError> {
        debug!("Creating {} session for user: {}", input.mode, user_id);

        let id = sqlx::query(
            r#"
            INSERT INTO sessions (user_id, mode, status, subject, application, business_type, location, current_stage)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(input.mode.as_str())
        .bind(SessionStatus::Active.as_str())
        .bind(&input.subject)
        .bind(&input.application)
        .bind(&input.business_type)
        .bind(&input.location)
        .bind(Stage::Started.as_str())
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?
        .last_insert_rowid();

        self.get_session(user_id, id)
            .await?
            .ok_or(StorageError::NotFound("Session"))
    }

    /// All sessions owned by the user, newest first
    pub async fn list_sessions(&self, user_id: i64) -> Result<Vec<Session>, StorageError> {
        debug!("Listing sessions for user: {}", user_id);

        let rows = sqlx::query(
            "SELECT * FROM sessions WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_session(row)).collect()
    }

    /// Fetch a session only if it belongs to `user_id`
    pub async fn get_session(
        &self,
        user_id: i64,
        session_id: i64,
    ) -> Result<Option<Session>, StorageError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE id = ? AND user_id = ?")
            .bind(session_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|r| self.row_to_session(&r)).transpose()
    }

    /// Apply the provided fields and bump `updated_at`. Returns `None` for a missing or foreign session.
    pub async fn update_session(
        &self,
        user_id: i64,
        session_id: i64,
        input: SessionUpdateInput,
    ) -> Result<Option<Session>, StorageError> {
        debug!("Updating session: {}", session_id);

        if input.is_empty() {
            return self.get_session(user_id, session_id).await;
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE sessions SET updated_at = ");
        builder.push_bind(Utc::now());

        if let Some(status) = input.status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(subject) = input.subject {
            builder.push(", subject = ").push_bind(subject);
        }
        if let Some(application) = input.application {
            builder.push(", application = ").push_bind(application);
        }
        if let Some(project_idea) = input.project_idea {
            builder.push(", project_idea = ").push_bind(project_idea);
        }
        if let Some(business_type) = input.business_type {
            builder.push(", business_type = ").push_bind(business_type);
        }
        if let Some(location) = input.location {
            builder.push(", location = ").push_bind(location);
        }
        if let Some(business_idea) = input.business_idea {
            builder.push(", business_idea = ").push_bind(business_idea);
        }
        if let Some(stage) = input.current_stage {
            builder.push(", current_stage = ").push_bind(stage.as_str());
        }
        if let Some(metadata) = input.metadata {
            builder
                .push(", metadata = ")
                .push_bind(serde_json::to_string(&metadata)?);
        }

        builder
            .push(" WHERE id = ")
            .push_bind(session_id)
            .push(" AND user_id = ")
            .push_bind(user_id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_session(user_id, session_id).await
    }

    /// Delete a session and, through cascading keys, its messages and reports
    pub async fn delete_session(&self, user_id: i64, session_id: i64) -> Result<bool, StorageError> {
        debug!("Deleting session: {}", session_id);

        let result = sqlx::query("DELETE FROM sessions WHERE id = ? AND user_id = ?")
            .bind(session_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    /// Move a session to a new stage
    pub async fn set_stage(&self, session_id: i64, stage: Stage) -> Result<(), StorageError> {
        debug!("Session {} moving to stage {}", session_id, stage);

        sqlx::query("UPDATE sessions SET current_stage = ?, updated_at = ? WHERE id = ?")
            .bind(stage.as_str())
            .bind(Utc::now())
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    fn row_to_session(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Session, StorageError> {
        Ok(Session {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            mode: row.try_get::<String, _>("mode")?.parse()?,
            status: row.try_get::<String, _>("status")?.parse()?,
            subject: row.try_get("subject")?,
            application: row.try_get("application")?,
            project_idea: row.try_get("project_idea")?,
            business_type: row.try_get("business_type")?,
            location: row.try_get("location")?,
            business_idea: row.try_get("business_idea")?,
            current_stage: row.try_get::<String, _>("current_stage")?.parse()?,
            metadata: json_column(row.try_get("metadata")?)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
