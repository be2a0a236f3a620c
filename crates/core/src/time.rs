use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// A simple clock abstraction for deterministic time in services and tests.
///
/// Streaks and the activity log are keyed by the *local* calendar day, so the
/// clock hands out local naive timestamps rather than UTC instants.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(NaiveDateTime),
}

impl Clock {
    /// Returns a clock that uses the current local system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given local timestamp.
    #[must_use]
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current local time according to the clock.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::Default => Local::now().naive_local(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Returns the current local calendar date, with the time of day dropped.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Returns true if this clock represents real time.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Clock::Default)
    }

    /// Returns true if this clock is fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Returns a deterministic local timestamp for tests and doc examples
/// (2024-01-15 10:30:00).
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(10, 30, 0))
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
