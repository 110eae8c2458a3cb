use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{ProgressMirrorRepository, Storage};

mod mapping;
mod migrate;
mod progress_mirror_repo;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Offline copy of the last progress snapshot the server returned.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Opens (creating if needed) the mirror database and migrates it.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the URL is invalid, the file cannot be
    /// opened, or a migration fails.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        // Child rows are removed through ON DELETE CASCADE.
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await?;
        migrate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

impl Storage {
    /// Build a `Storage` whose progress mirror lives in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the mirror cannot be opened.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let progress_mirror: Arc<dyn ProgressMirrorRepository> =
            Arc::new(SqliteRepository::open(database_url).await?);
        Ok(Self { progress_mirror })
    }
}
