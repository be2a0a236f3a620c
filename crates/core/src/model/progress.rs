use chrono::NaiveDate;

use super::{ActivityEvent, AggregateStats, DailyActivityLog, DailyActivityRecord};

/// Outcome of applying one event to a [`ProgressState`].
///
/// `touched_day` is the daily record that changed (sessions only; quiz
/// completions touch no day), so storage can persist exactly the stats +
/// touched-day pair in one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventApplied {
    pub stats: AggregateStats,
    pub touched_day: Option<DailyActivityRecord>,
    pub clock_anomaly: bool,
}

/// The pair of containers that must always be read and written together:
/// aggregate stats plus the day-by-day activity log.
///
/// All event arithmetic lives here so it can be replayed and tested without
/// any storage dependency; services wrap it with a load/apply/store cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    stats: AggregateStats,
    log: DailyActivityLog,
}

impl ProgressState {
    #[must_use]
    pub fn new(stats: AggregateStats, log: DailyActivityLog) -> Self {
        Self { stats, log }
    }

    #[must_use]
    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    #[must_use]
    pub fn log(&self) -> &DailyActivityLog {
        &self.log
    }

    /// Applies one activity event for the given calendar day.
    ///
    /// Sessions update the daily log and the aggregates in lockstep; quiz
    /// completions only raise the best-score high-water mark. Never fails:
    /// events are validated at construction and clock anomalies degrade to a
    /// streak reset reported via the returned flag.
    pub fn apply_event(&mut self, event: &ActivityEvent, today: NaiveDate) -> EventApplied {
        match *event {
            ActivityEvent::SessionEnded { duration_seconds } => {
                let day = self.log.record_session(today, duration_seconds);
                let update = self.stats.apply_session(duration_seconds, today);
                EventApplied {
                    stats: self.stats,
                    touched_day: Some(day),
                    clock_anomaly: update.clock_anomaly,
                }
            }
            ActivityEvent::QuizCompleted { score_percent } => {
                self.stats.apply_quiz_score(score_percent);
                EventApplied {
                    stats: self.stats,
                    touched_day: None,
                    clock_anomaly: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn session_updates_log_and_stats_in_lockstep() {
        let mut state = ProgressState::default();
        let applied = state.apply_event(&ActivityEvent::session_ended(600), date(15));

        let day = applied.touched_day.unwrap();
        assert_eq!(day.date, date(15));
        assert_eq!(day.sessions_count, 1);
        assert_eq!(day.time_spent_seconds, 600);

        assert_eq!(state.stats().total_sessions(), 1);
        assert_eq!(state.stats().total_time_spent_seconds(), 600);
        assert_eq!(state.log().get(date(15)), Some(&day));
    }

    #[test]
    fn quiz_touches_no_day_and_no_streak() {
        let mut state = ProgressState::default();
        let event = ActivityEvent::quiz_completed(80).unwrap();
        let applied = state.apply_event(&event, date(15));

        assert_eq!(applied.touched_day, None);
        assert_eq!(state.stats().best_quiz_score_percent(), 80);
        assert_eq!(state.stats().streak_days(), 0);
        assert!(state.log().is_empty());
    }

    #[test]
    fn replay_totals_match_the_event_sequence() {
        // Replaying any sequence leaves the aggregates equal to what the
        // sequence itself adds up to.
        let mut state = ProgressState::default();
        let durations = [600_u64, 0, 300, 1800, 45];
        let scores = [60_u8, 90, 70];

        let mut day = date(10);
        for (i, duration) in durations.iter().enumerate() {
            state.apply_event(&ActivityEvent::session_ended(*duration), day);
            if i % 2 == 1 {
                day += Duration::days(1);
            }
        }
        for score in scores {
            state.apply_event(&ActivityEvent::quiz_completed(score).unwrap(), day);
        }

        assert_eq!(state.stats().total_sessions(), durations.len() as u64);
        assert_eq!(
            state.stats().total_time_spent_seconds(),
            durations.iter().sum::<u64>()
        );
        assert_eq!(state.stats().best_quiz_score_percent(), 90);

        // The log and the aggregates never diverge.
        assert_eq!(state.log().total_sessions(), state.stats().total_sessions());
        assert_eq!(
            state.log().total_time_spent_seconds(),
            state.stats().total_time_spent_seconds()
        );
    }

    #[test]
    fn streak_sequence_follows_the_calendar() {
        let mut state = ProgressState::default();
        let session = ActivityEvent::session_ended(60);

        state.apply_event(&session, date(1));
        assert_eq!(state.stats().streak_days(), 1);

        state.apply_event(&session, date(1));
        assert_eq!(state.stats().streak_days(), 1);

        state.apply_event(&session, date(2));
        assert_eq!(state.stats().streak_days(), 2);

        state.apply_event(&session, date(4));
        assert_eq!(state.stats().streak_days(), 1);
    }

    #[test]
    fn quiz_alone_never_starts_a_streak() {
        let mut state = ProgressState::default();
        state.apply_event(&ActivityEvent::quiz_completed(100).unwrap(), date(1));
        state.apply_event(&ActivityEvent::quiz_completed(100).unwrap(), date(2));

        assert_eq!(state.stats().streak_days(), 0);
        assert_eq!(state.stats().last_active_date(), None);
    }

    #[test]
    fn backwards_clock_is_reported_not_fatal() {
        let mut state = ProgressState::default();
        state.apply_event(&ActivityEvent::session_ended(60), date(20));

        let applied = state.apply_event(&ActivityEvent::session_ended(60), date(15));
        assert!(applied.clock_anomaly);
        assert_eq!(state.stats().streak_days(), 1);
    }

    #[test]
    fn zero_duration_session_still_counts() {
        let mut state = ProgressState::default();
        state.apply_event(&ActivityEvent::session_ended(0), date(15));

        assert_eq!(state.stats().total_sessions(), 1);
        assert_eq!(state.stats().streak_days(), 1);
        assert_eq!(state.log().get(date(15)).unwrap().sessions_count, 1);
    }
}
