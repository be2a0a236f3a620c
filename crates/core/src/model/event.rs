use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventError {
    #[error("quiz score {got}% is outside 0..=100")]
    ScoreOutOfRange { got: u8 },
}

/// A raw activity event emitted by one of the two producers.
///
/// Transient: events are applied to [`super::ProgressState`] and never
/// persisted themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    /// A completed coding session with its wall-clock duration in whole
    /// seconds. Duration 0 is valid and still counts.
    SessionEnded { duration_seconds: u64 },
    /// A full run-through of a quiz with the percentage score rounded to the
    /// nearest integer.
    QuizCompleted { score_percent: u8 },
}

impl ActivityEvent {
    #[must_use]
    pub fn session_ended(duration_seconds: u64) -> Self {
        Self::SessionEnded { duration_seconds }
    }

    /// Builds a quiz-completion event, rejecting out-of-range scores before
    /// they can reach the engine.
    ///
    /// # Errors
    ///
    /// Returns `EventError::ScoreOutOfRange` if `score_percent` exceeds 100.
    pub fn quiz_completed(score_percent: u8) -> Result<Self, EventError> {
        if score_percent > 100 {
            return Err(EventError::ScoreOutOfRange { got: score_percent });
        }
        Ok(Self::QuizCompleted { score_percent })
    }
}
