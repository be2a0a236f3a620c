use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Per-day activity counters.
///
/// One record exists per distinct calendar date; counters only ever grow and
/// records are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyActivityRecord {
    pub date: NaiveDate,
    pub sessions_count: u32,
    pub time_spent_seconds: u64,
}

impl DailyActivityRecord {
    /// Returns a zero-valued record for the given date.
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            sessions_count: 0,
            time_spent_seconds: 0,
        }
    }
}

/// The day-by-day activity log: calendar date to per-day counters.
///
/// Keyed by date, so there is at most one record per calendar day by
/// construction. Iteration is oldest-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyActivityLog {
    days: BTreeMap<NaiveDate, DailyActivityRecord>,
}

impl DailyActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from persisted records. A duplicate date keeps the
    /// record seen last.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = DailyActivityRecord>) -> Self {
        let mut log = Self::new();
        for record in records {
            log.days.insert(record.date, record);
        }
        log
    }

    /// Replaces the record for its date. Intended for storage rehydration;
    /// event application goes through [`Self::record_session`].
    pub fn insert(&mut self, record: DailyActivityRecord) {
        self.days.insert(record.date, record);
    }

    /// Folds one completed session into the record for `date`, creating the
    /// record if this is the first activity on that day.
    ///
    /// Returns a copy of the updated record so the caller can persist exactly
    /// the day that changed.
    pub fn record_session(&mut self, date: NaiveDate, duration_seconds: u64) -> DailyActivityRecord {
        let record = self
            .days
            .entry(date)
            .or_insert_with(|| DailyActivityRecord::empty(date));
        record.sessions_count = record.sessions_count.saturating_add(1);
        record.time_spent_seconds = record.time_spent_seconds.saturating_add(duration_seconds);
        *record
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&DailyActivityRecord> {
        self.days.get(&date)
    }

    /// All records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &DailyActivityRecord> {
        self.days.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of `sessions_count` over all records.
    #[must_use]
    pub fn total_sessions(&self) -> u64 {
        self.days
            .values()
            .map(|r| u64::from(r.sessions_count))
            .sum()
    }

    /// Sum of `time_spent_seconds` over all records.
    #[must_use]
    pub fn total_time_spent_seconds(&self) -> u64 {
        self.days.values().map(|r| r.time_spent_seconds).sum()
    }
}
