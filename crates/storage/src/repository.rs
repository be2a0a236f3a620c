use async_trait::async_trait;
use codetrack_core::model::{
    AggregateStats, CodeSnippet, DailyActivityLog, DailyActivityRecord, ProgressState,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the engine's paired persisted state.
///
/// The aggregate stats and the daily activity log must never be observable
/// out of sync, so the trait reads them as one [`ProgressState`] and writes
/// the stats together with the one daily record an event touched.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the persisted stats + activity log pair.
    ///
    /// A store that was never written yields zero-valued defaults. A
    /// malformed record degrades to defaults (stats) or is skipped (daily
    /// rows) with a logged warning rather than failing the load.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the store itself cannot be read.
    async fn load_progress(&self) -> Result<ProgressState, StorageError>;

    /// Persist the stats and, for session events, the daily record that
    /// changed — atomically, as one unit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write cannot be applied.
    async fn save_progress(
        &self,
        stats: &AggregateStats,
        touched_day: Option<&DailyActivityRecord>,
    ) -> Result<(), StorageError>;
}

/// Repository contract for the saved editor snippet.
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Persist the snippet, replacing any previously saved one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snippet cannot be stored.
    async fn save_snippet(&self, snippet: &CodeSnippet) -> Result<(), StorageError>;

    /// Fetch the saved snippet, or `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn load_snippet(&self) -> Result<Option<CodeSnippet>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<(AggregateStats, DailyActivityLog)>>,
    snippet: Arc<Mutex<Option<CodeSnippet>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<ProgressState, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let (stats, log) = &*guard;
        Ok(ProgressState::new(*stats, log.clone()))
    }

    async fn save_progress(
        &self,
        stats: &AggregateStats,
        touched_day: Option<&DailyActivityRecord>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.0 = *stats;
        if let Some(day) = touched_day {
            guard.1.insert(*day);
        }
        Ok(())
    }
}

#[async_trait]
impl SnippetRepository for InMemoryRepository {
    async fn save_snippet(&self, snippet: &CodeSnippet) -> Result<(), StorageError> {
        let mut guard = self
            .snippet
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(snippet.clone());
        Ok(())
    }

    async fn load_snippet(&self) -> Result<Option<CodeSnippet>, StorageError> {
        let guard = self
            .snippet
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Aggregates the repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub snippets: Arc<dyn SnippetRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let snippets: Arc<dyn SnippetRepository> = Arc::new(repo);
        Self { progress, snippets }
    }
}
