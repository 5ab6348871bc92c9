// ABOUTME: User storage layer using SQLite
// ABOUTME: Account creation and lookup by id or email

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{NewUser, User};
use crate::StorageError;

const UNIQUE_COLUMNS: &[(&str, &str)] = &[("users.email", "email"), ("users.username", "username")];

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account. A taken email or username yields `StorageError::Duplicate`.
    pub async fn create_user(&self, input: NewUser) -> Result<User, StorageError> {
        debug!("Creating user: {}", input.username);

        let id = sqlx::query(
            r#"
            INSERT INTO users (email, username, hashed_password, full_name)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&input.email)
        .bind(&input.username)
        .bind(&input.hashed_password)
        .bind(&input.full_name)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::from_insert(e, UNIQUE_COLUMNS))?
        .last_insert_rowid();

        self.get_user(id)
            .await?
            .ok_or(StorageError::NotFound("User"))
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, StorageError> {
        debug!("Fetching user: {}", user_id);

        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|r| self.row_to_user(&r)).transpose()
    }

    /// Lookup by email; callers pass the normalized (lowercased) address
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|r| self.row_to_user(&r)).transpose()
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, StorageError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;
        Ok(exists)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, StorageError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;
        Ok(exists)
    }

    fn row_to_user(&self, row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            hashed_password: row.try_get("hashed_password")?,
            full_name: row.try_get("full_name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
