use chrono::NaiveDate;

/// Result of recomputing the streak for a new activity day.
///
/// `clock_anomaly` is set when the stored last-active date lies in the future
/// relative to `today`, which can only happen if the system clock moved
/// backwards or the persisted date was corrupted. The streak restarts at 1 in
/// that case; the caller decides how loudly to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: u32,
    pub clock_anomaly: bool,
}

impl StreakUpdate {
    fn ok(streak: u32) -> Self {
        Self {
            streak,
            clock_anomaly: false,
        }
    }
}

/// Computes the new streak value given the previous state and today's date.
///
/// Pure function over calendar days; both inputs are already date-only, so
/// time-of-day can never skew the gap.
///
/// - No previous activity: the streak starts at 1.
/// - Same day: unchanged (re-entry never inflates the streak). A stored
///   streak of 0 normalizes to 1 since today is an active day.
/// - Exactly one day later: extended by 1.
/// - More than one day later: broken, restarts at 1.
/// - Earlier than the last active day: restarts at 1 and flags the anomaly.
#[must_use]
pub fn next_streak(
    previous_last_active: Option<NaiveDate>,
    previous_streak: u32,
    today: NaiveDate,
) -> StreakUpdate {
    let Some(last_active) = previous_last_active else {
        return StreakUpdate::ok(1);
    };

    let gap_days = (today - last_active).num_days();
    match gap_days {
        0 => StreakUpdate::ok(previous_streak.max(1)),
        1 => StreakUpdate::ok(previous_streak.saturating_add(1)),
        g if g > 1 => StreakUpdate::ok(1),
        _ => StreakUpdate {
            streak: 1,
            clock_anomaly: true,
        },
    }
}
