use chrono::NaiveDate;
use thiserror::Error;

use crate::streak::{self, StreakUpdate};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatsError {
    #[error("persisted best quiz score {got}% is outside 0..=100")]
    ScoreOutOfRange { got: u8 },
}

/// Durable aggregate statistics maintained alongside the daily activity log.
///
/// Singleton persisted state. Always mutated through [`apply_session`] and
/// [`apply_quiz_score`] so the invariants hold: totals only grow, the best
/// quiz score is a high-water mark, and the streak follows the calendar
/// rules in [`crate::streak`].
///
/// [`apply_session`]: AggregateStats::apply_session
/// [`apply_quiz_score`]: AggregateStats::apply_quiz_score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    streak_days: u32,
    total_sessions: u64,
    total_time_spent_seconds: u64,
    best_quiz_score_percent: u8,
    last_active_date: Option<NaiveDate>,
}

impl AggregateStats {
    /// Rehydrates stats from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::ScoreOutOfRange` if the stored best quiz score
    /// exceeds 100.
    pub fn from_persisted(
        streak_days: u32,
        total_sessions: u64,
        total_time_spent_seconds: u64,
        best_quiz_score_percent: u8,
        last_active_date: Option<NaiveDate>,
    ) -> Result<Self, StatsError> {
        if best_quiz_score_percent > 100 {
            return Err(StatsError::ScoreOutOfRange {
                got: best_quiz_score_percent,
            });
        }

        Ok(Self {
            streak_days,
            total_sessions,
            total_time_spent_seconds,
            best_quiz_score_percent,
            last_active_date,
        })
    }

    /// Folds one completed coding session into the aggregates.
    ///
    /// The streak is recomputed from the pre-update last-active date, then
    /// the last-active date moves to `today`.
    pub fn apply_session(&mut self, duration_seconds: u64, today: NaiveDate) -> StreakUpdate {
        let update = streak::next_streak(self.last_active_date, self.streak_days, today);

        self.streak_days = update.streak;
        self.total_sessions = self.total_sessions.saturating_add(1);
        self.total_time_spent_seconds = self
            .total_time_spent_seconds
            .saturating_add(duration_seconds);
        self.last_active_date = Some(today);

        update
    }

    /// Records a quiz score, keeping the best one ever seen.
    ///
    /// Quiz activity is a parallel metric: it touches neither the streak nor
    /// the session counters. The caller validates the 0..=100 range.
    pub fn apply_quiz_score(&mut self, score_percent: u8) {
        self.best_quiz_score_percent = self.best_quiz_score_percent.max(score_percent.min(100));
    }

    #[must_use]
    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    #[must_use]
    pub fn total_sessions(&self) -> u64 {
        self.total_sessions
    }

    #[must_use]
    pub fn total_time_spent_seconds(&self) -> u64 {
        self.total_time_spent_seconds
    }

    #[must_use]
    pub fn best_quiz_score_percent(&self) -> u8 {
        self.best_quiz_score_percent
    }

    #[must_use]
    pub fn last_active_date(&self) -> Option<NaiveDate> {
        self.last_active_date
    }
}
