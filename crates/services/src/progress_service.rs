//! Single write path for progress events.
//!
//! Every session and quiz completion funnels through [`ProgressService`],
//! which loads the persisted state, applies the event with the domain rules
//! in `codetrack-core`, and saves the updated stats together with the
//! touched day in one repository call.

use std::sync::Arc;

use codetrack_core::Clock;
use codetrack_core::calendar::{CalendarCell, build_calendar};
use codetrack_core::model::{ActivityEvent, AggregateStats};
use storage::repository::ProgressRepository;

use crate::error::ProgressError;

/// Window used by [`ProgressService::calendar`]: a rolling year.
pub const DEFAULT_CALENDAR_WINDOW_DAYS: u32 = 365;

pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, progress }
    }

    /// Records a finished practice session of `duration_seconds`.
    ///
    /// Zero-duration sessions still count toward the session totals and
    /// the streak.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read or written.
    pub async fn record_session_ended(
        &self,
        duration_seconds: u64,
    ) -> Result<AggregateStats, ProgressError> {
        self.apply(ActivityEvent::session_ended(duration_seconds))
            .await
    }

    /// Records a completed quiz with the given percentage score.
    ///
    /// Quiz completions only move the best-score high-water mark; they do
    /// not touch the streak, session counters, or the daily log.
    ///
    /// # Errors
    ///
    /// Returns an error when `score_percent` exceeds 100 or the store
    /// cannot be read or written.
    pub async fn record_quiz_completed(
        &self,
        score_percent: u8,
    ) -> Result<AggregateStats, ProgressError> {
        let event = ActivityEvent::quiz_completed(score_percent)?;
        self.apply(event).await
    }

    async fn apply(&self, event: ActivityEvent) -> Result<AggregateStats, ProgressError> {
        let today = self.clock.today();
        let mut state = self.progress.load_progress().await?;
        let applied = state.apply_event(&event, today);
        if applied.clock_anomaly {
            tracing::warn!("last active date is in the future, streak reset to 1");
        }
        self.progress
            .save_progress(&applied.stats, applied.touched_day.as_ref())
            .await?;
        Ok(applied.stats)
    }

    /// Returns the current aggregate counters.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub async fn aggregate_stats(&self) -> Result<AggregateStats, ProgressError> {
        let state = self.progress.load_progress().await?;
        Ok(*state.stats())
    }

    /// Builds the rolling-year activity calendar ending today.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub async fn calendar(&self) -> Result<Vec<CalendarCell>, ProgressError> {
        self.calendar_window(DEFAULT_CALENDAR_WINDOW_DAYS).await
    }

    /// Builds the activity calendar for the trailing `window_days` days.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub async fn calendar_window(
        &self,
        window_days: u32,
    ) -> Result<Vec<CalendarCell>, ProgressError> {
        let state = self.progress.load_progress().await?;
        Ok(build_calendar(state.log(), self.clock.today(), window_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use codetrack_core::calendar::IntensityLevel;
    use codetrack_core::time::fixed_clock;
    use storage::repository::Storage;

    fn service_at(storage: &Storage, date: NaiveDate) -> ProgressService {
        let clock = Clock::Fixed(date.and_hms_opt(9, 0, 0).unwrap());
        ProgressService::new(clock, Arc::clone(&storage.progress))
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test]
    async fn sessions_accumulate_and_extend_the_streak() {
        let storage = Storage::in_memory();

        let day_one = service_at(&storage, date(15));
        day_one.record_session_ended(600).await.unwrap();
        let stats = day_one.record_session_ended(300).await.unwrap();
        assert_eq!(stats.streak_days(), 1);
        assert_eq!(stats.total_sessions(), 2);
        assert_eq!(stats.total_time_spent_seconds(), 900);

        let day_two = service_at(&storage, date(16));
        let stats = day_two.record_session_ended(120).await.unwrap();
        assert_eq!(stats.streak_days(), 2);
        assert_eq!(stats.total_sessions(), 3);
    }

    #[tokio::test]
    async fn quiz_completion_keeps_the_best_score_only() {
        let storage = Storage::in_memory();
        let service = ProgressService::new(fixed_clock(), Arc::clone(&storage.progress));

        service.record_quiz_completed(70).await.unwrap();
        service.record_quiz_completed(90).await.unwrap();
        let stats = service.record_quiz_completed(40).await.unwrap();

        assert_eq!(stats.best_quiz_score_percent(), 90);
        assert_eq!(stats.streak_days(), 0);
        assert_eq!(stats.total_sessions(), 0);
        assert!(service.calendar().await.unwrap().iter().all(|cell| {
            cell.sessions_count == 0 && cell.intensity == IntensityLevel::None
        }));
    }

    #[tokio::test]
    async fn quiz_score_above_100_is_rejected_before_storage() {
        let storage = Storage::in_memory();
        let service = ProgressService::new(fixed_clock(), Arc::clone(&storage.progress));

        let err = service.record_quiz_completed(101).await.unwrap_err();
        assert!(matches!(err, ProgressError::Event(_)));

        let stats = service.aggregate_stats().await.unwrap();
        assert_eq!(stats, AggregateStats::default());
    }

    #[tokio::test]
    async fn calendar_reflects_recorded_sessions() {
        let storage = Storage::in_memory();
        let service = service_at(&storage, date(15));
        service.record_session_ended(600).await.unwrap();
        service.record_session_ended(300).await.unwrap();
        service.record_session_ended(60).await.unwrap();

        let calendar = service.calendar().await.unwrap();
        assert_eq!(calendar.len(), DEFAULT_CALENDAR_WINDOW_DAYS as usize);

        let today = calendar.last().unwrap();
        assert_eq!(today.date, date(15));
        assert_eq!(today.sessions_count, 3);
        assert_eq!(today.time_spent_seconds, 960);
        assert_eq!(today.intensity, IntensityLevel::High);
    }
}
