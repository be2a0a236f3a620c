//! Shared error types for the services crate.

use thiserror::Error;

use codetrack_core::model::{EventError, QuizScoreError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Event(#[from] EventError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SessionTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no session in progress")]
    NotStarted,
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by `QuizRun`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for quiz")]
    Empty,
    #[error("quiz already answered to completion")]
    Completed,
    #[error("quiz run is not finished yet")]
    Incomplete,
    #[error("quiz result already reported")]
    AlreadyReported,
    #[error(transparent)]
    Score(#[from] QuizScoreError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by `SnippetService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnippetError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
