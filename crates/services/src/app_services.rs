//! Wiring of services over a shared storage backend.

use std::sync::Arc;

use codetrack_core::Clock;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::session_tracker::SessionTracker;
use crate::snippet_service::SnippetService;

/// The engine's public surface: one service per concern, all sharing the
/// same storage backend and clock.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    progress: Arc<ProgressService>,
    snippets: Arc<SnippetService>,
}

impl AppServices {
    /// Opens the SQLite database at `db_url`, runs migrations, and wires
    /// the services over it.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or migrated.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, clock))
    }

    /// Wires the services over in-memory repositories. Used in tests and
    /// anywhere persistence is not wanted.
    #[must_use]
    pub fn new_in_memory(clock: Clock) -> Self {
        Self::from_storage(Storage::in_memory(), clock)
    }

    fn from_storage(storage: Storage, clock: Clock) -> Self {
        let progress = Arc::new(ProgressService::new(clock, storage.progress));
        let snippets = Arc::new(SnippetService::new(clock, storage.snippets));
        Self {
            clock,
            progress,
            snippets,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn snippets(&self) -> Arc<SnippetService> {
        Arc::clone(&self.snippets)
    }

    /// Creates a tracker for a new practice session.
    #[must_use]
    pub fn new_session(&self) -> SessionTracker {
        SessionTracker::new(self.progress())
    }
}
