//! Explicit start/end lifecycle for a practice session.
//!
//! A tracker is created per session. `start` stamps the moment practice
//! begins and `end` reports the elapsed duration to the progress service,
//! so exactly one session event is recorded per completed session.

use std::sync::Arc;

use chrono::NaiveDateTime;
use codetrack_core::model::AggregateStats;

use crate::error::SessionError;
use crate::progress_service::ProgressService;

/// Result of ending a tracked session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedSession {
    pub duration_seconds: u64,
    pub stats: AggregateStats,
}

pub struct SessionTracker {
    progress: Arc<ProgressService>,
    started_at: Option<NaiveDateTime>,
}

impl SessionTracker {
    #[must_use]
    pub fn new(progress: Arc<ProgressService>) -> Self {
        Self {
            progress,
            started_at: None,
        }
    }

    /// Marks the session as started at `started_at`.
    ///
    /// The timestamp should come from the services layer clock. Calling
    /// `start` again before `end` restarts the session from the new
    /// timestamp.
    pub fn start(&mut self, started_at: NaiveDateTime) {
        self.started_at = Some(started_at);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Ends the session at `ended_at` and records it.
    ///
    /// The duration is the whole seconds between start and end; when the
    /// clock moved backwards in between, the session is recorded with a
    /// zero duration rather than discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotStarted`] when no session is in
    /// progress, or a progress error when recording fails. On a recording
    /// failure the session stays running so the caller can retry `end`.
    pub async fn end(&mut self, ended_at: NaiveDateTime) -> Result<CompletedSession, SessionError> {
        let Some(started_at) = self.started_at else {
            return Err(SessionError::NotStarted);
        };

        let elapsed = (ended_at - started_at).num_seconds();
        let duration_seconds = u64::try_from(elapsed).unwrap_or_else(|_| {
            tracing::warn!("session ended before it started, recording zero duration");
            0
        });

        let stats = self.progress.record_session_ended(duration_seconds).await?;
        self.started_at = None;

        Ok(CompletedSession {
            duration_seconds,
            stats,
        })
    }
}
