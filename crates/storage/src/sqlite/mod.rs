use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{ProgressRepository, SnippetRepository, Storage};

mod mapping;
mod migrate;
mod progress_repo;
mod snippet_repo;

/// Applied on every new pool connection. WAL keeps readers and the writer
/// from blocking each other; the busy timeout covers writer contention
/// between processes.
const CONNECTION_PRAGMAS: &[&str] = &[
    "PRAGMA journal_mode = WAL;",
    "PRAGMA synchronous = NORMAL;",
    "PRAGMA busy_timeout = 5000;",
];

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
    /// Opens a connection pool for the database at `url`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` when the database cannot be opened or one
    /// of the setup pragmas fails.
    pub async fn connect(url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    for pragma in CONNECTION_PRAGMAS {
                        sqlx::query(pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to the current version. Safe to call on every
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` when a migration statement fails.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Opens and migrates the database at `url`, returning storage handles
    /// backed by it.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` when the database cannot be opened or
    /// migrated.
    pub async fn sqlite(url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(url).await?;
        repo.migrate().await?;
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let snippets: Arc<dyn SnippetRepository> = Arc::new(repo);
        Ok(Self { progress, snippets })
    }
}
