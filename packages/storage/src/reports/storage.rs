// ABOUTME: Report storage layer using SQLite
// ABOUTME: Persists evaluations and completes the evaluated session in one transaction

use chrono::Utc;
use realworlded_core::SessionStatus;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::types::{Report, ReportCreateInput};
use crate::{json_column, StorageError};

pub struct ReportStorage {
    pool: SqlitePool,
}

impl ReportStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the report and mark the session completed; both or neither are written
    pub async fn create_report_and_complete_session(
        &self,
        user_id: i64,
        session_id: i64,
        input: ReportCreateInput,
    ) -> Result<Report, StorageError> {
        let strengths = serde_json::to_string(&input.strengths)?;
        let improvements = serde_json::to_string(&input.improvements)?;
        let evaluation_data = input
            .evaluation_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let row = sqlx::query(
            r#"
            INSERT INTO reports (
                user_id, session_id, technical_score, communication_score, creativity_score,
                business_sense_score, overall_score, strengths, improvements,
                detailed_feedback, evaluation_data
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(session_id)
        .bind(input.technical_score)
        .bind(input.communication_score)
        .bind(input.creativity_score)
        .bind(input.business_sense_score)
        .bind(input.overall_score)
        .bind(strengths)
        .bind(improvements)
        .bind(&input.detailed_feedback)
        .bind(evaluation_data)
        .fetch_one(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        let report = self.row_to_report(&row)?;

        let updated = sqlx::query(
            "UPDATE sessions SET status = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(SessionStatus::Completed.as_str())
        .bind(Utc::now())
        .bind(session_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls back the insert
            return Err(StorageError::NotFound("Session"));
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;

        info!("Session {} evaluated, report {}", session_id, report.id);
        Ok(report)
    }

    /// All reports owned by the user, newest first
    pub async fn list_reports(&self, user_id: i64) -> Result<Vec<Report>, StorageError> {
        debug!("Listing reports for user: {}", user_id);

        let rows =
            sqlx::query("SELECT * FROM reports WHERE user_id = ? ORDER BY created_at DESC, id DESC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_report(row)).collect()
    }

    pub async fn get_report(
        &self,
        user_id: i64,
        report_id: i64,
    ) -> Result<Option<Report>, StorageError> {
        let row = sqlx::query("SELECT * FROM reports WHERE id = ? AND user_id = ?")
            .bind(report_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|r| self.row_to_report(&r)).transpose()
    }

    /// Most recent report for a session the user owns
    pub async fn latest_report_for_session(
        &self,
        user_id: i64,
        session_id: i64,
    ) -> Result<Option<Report>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT * FROM reports
            WHERE session_id = ? AND user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        row.map(|r| self.row_to_report(&r)).transpose()
    }

    fn row_to_report(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Report, StorageError> {
        Ok(Report {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            session_id: row.try_get("session_id")?,
            technical_score: row.try_get("technical_score")?,
            communication_score: row.try_get("communication_score")?,
            creativity_score: row.try_get("creativity_score")?,
            business_sense_score: row.try_get("business_sense_score")?,
            overall_score: row.try_get("overall_score")?,
            strengths: json_column(row.try_get("strengths")?)?.unwrap_or_default(),
            improvements: json_column(row.try_get("improvements")?)?.unwrap_or_default(),
            detailed_feedback: row.try_get("detailed_feedback")?,
            evaluation_data: json_column(row.try_get("evaluation_data")?)?,
            created_at: row.try_get("created_at")?,
        })
    }
}
