// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the per-entity storage layers

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::messages::MessageStorage;
use crate::reports::ReportStorage;
use crate::sessions::SessionStorage;
use crate::users::UserStorage;
use crate::StorageError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub user_storage: Arc<UserStorage>,
    pub session_storage: Arc<SessionStorage>,
    pub message_storage: Arc<MessageStorage>,
    pub report_storage: Arc<ReportStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            user_storage: Arc::new(UserStorage::new(pool.clone())),
            session_storage: Arc::new(SessionStorage::new(pool.clone())),
            message_storage: Arc::new(MessageStorage::new(pool.clone())),
            report_storage: Arc::new(ReportStorage::new(pool.clone())),
            pool,
        }
    }

    /// Connect to a file-backed database (e.g. `sqlite:./realworlded.db`) and run migrations
    pub async fn init(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        // Ensure parent directory exists
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("Database connection established");

        Self::migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Private in-memory database, used by tests and throwaway runs
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // Every connection to :memory: is a separate database, so pin the pool to one
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), StorageError> {
        MIGRATOR.run(pool).await?;
        debug!("Database migrations completed");
        Ok(())
    }
}
