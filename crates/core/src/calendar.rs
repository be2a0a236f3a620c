use chrono::{Duration, NaiveDate};

use crate::model::DailyActivityLog;

/// Heat-map bucket for a single day, derived from its session count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntensityLevel {
    None,
    Low,
    Medium,
    High,
}

impl IntensityLevel {
    /// Buckets a session count: 0, 1, 2, and 3-or-more. Total over all
    /// inputs.
    #[must_use]
    pub fn from_sessions(sessions_count: u32) -> Self {
        match sessions_count {
            0 => Self::None,
            1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Numeric level 0..=3 for renderers that index a palette.
    #[must_use]
    pub fn value(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// One heat-map cell. Derived and read-only; days without a log record come
/// out zero-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub sessions_count: u32,
    pub time_spent_seconds: u64,
    pub intensity: IntensityLevel,
}

/// Projects the activity log onto a rolling window of `window_days`
/// consecutive days ending at `today`, oldest first.
///
/// Every day in the window yields exactly one cell whether or not it has a
/// log record. The window is clamped so the oldest cell never falls before
/// the first representable calendar date; for any realistic window the
/// result has exactly `window_days` cells. Grouping cells into 7-day
/// columns is the renderer's concern.
#[must_use]
pub fn build_calendar(
    log: &DailyActivityLog,
    today: NaiveDate,
    window_days: u32,
) -> Vec<CalendarCell> {
    let representable_days = (today - NaiveDate::MIN).num_days().saturating_add(1);
    let window = i64::from(window_days).min(representable_days);
    let mut cells = Vec::with_capacity(usize::try_from(window).unwrap_or(0));

    for offset in (0..window).rev() {
        let date = today - Duration::days(offset);
        let (sessions_count, time_spent_seconds) = log
            .get(date)
            .map_or((0, 0), |r| (r.sessions_count, r.time_spent_seconds));

        cells.push(CalendarCell {
            date,
            sessions_count,
            time_spent_seconds,
            intensity: IntensityLevel::from_sessions(sessions_count),
        });
    }

    cells
}
