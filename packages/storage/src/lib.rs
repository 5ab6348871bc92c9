// ABOUTME: Data layer and persistence for RealWorldEd
// ABOUTME: SQLite pool setup, migrations, and storage for users, sessions, messages, and reports

use thiserror::Error;

pub mod db;
pub mod messages;
pub mod reports;
pub mod sessions;
pub mod users;

pub use db::DbState;
pub use messages::{Message, MessageStorage, NewMessage};
pub use reports::{Report, ReportCreateInput, ReportStorage};
pub use sessions::{Session, SessionCreateInput, SessionStorage, SessionUpdateInput};
pub use users::{NewUser, PublicUser, User, UserStorage};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid stored value: {0}")]
    InvalidData(#[from] realworlded_core::ParseEnumError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Duplicate {0}")]
    Duplicate(&'static str),
}

impl StorageError {
    /// Map a unique-constraint violation on `column` to `Duplicate`, pass anything else through
    pub(crate) fn from_insert(err: sqlx::Error, columns: &[(&str, &'static str)]) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let message = db_err.message();
                for (column, field) in columns {
                    if message.contains(column) {
                        return StorageError::Duplicate(field);
                    }
                }
            }
        }
        StorageError::Sqlx(err)
    }
}

/// Decode an optional JSON text column
pub(crate) fn json_column<T: serde::de::DeserializeOwned>(
    raw: Option<String>,
) -> Result<Option<T>, StorageError> {
    match raw {
        Some(text) if !text.is_empty() => Ok(Some(serde_json::from_str(&text)?)),
        _ => Ok(None),
    }
}
