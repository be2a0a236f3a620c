use chrono::NaiveDate;
use codetrack_core::model::{AggregateStats, DailyActivityRecord};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn u64_from_i64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn u8_from_i64(field: &'static str, v: i64) -> Result<u8, StorageError> {
    u8::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn count_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

/// Dates are stored as ISO `YYYY-MM-DD` strings; this keying doubles as the
/// one-record-per-day guarantee via the primary key.
pub(crate) fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_iso_date(s: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| StorageError::Serialization(format!("invalid date: {s}")))
}

pub(crate) fn map_stats_row(row: &sqlx::sqlite::SqliteRow) -> Result<AggregateStats, StorageError> {
    let streak_days = u32_from_i64(
        "streak_days",
        row.try_get::<i64, _>("streak_days").map_err(ser)?,
    )?;
    let total_sessions = u64_from_i64(
        "total_sessions",
        row.try_get::<i64, _>("total_sessions").map_err(ser)?,
    )?;
    let total_time_spent_seconds = u64_from_i64(
        "total_time_spent_seconds",
        row.try_get::<i64, _>("total_time_spent_seconds")
            .map_err(ser)?,
    )?;
    let best_quiz_score_percent = u8_from_i64(
        "best_quiz_score_percent",
        row.try_get::<i64, _>("best_quiz_score_percent")
            .map_err(ser)?,
    )?;
    let last_active_date = row
        .try_get::<Option<String>, _>("last_active_date")
        .map_err(ser)?
        .map(|s| parse_iso_date(&s))
        .transpose()?;

    AggregateStats::from_persisted(
        streak_days,
        total_sessions,
        total_time_spent_seconds,
        best_quiz_score_percent,
        last_active_date,
    )
    .map_err(ser)
}

pub(crate) fn map_day_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<DailyActivityRecord, StorageError> {
    let date = parse_iso_date(&row.try_get::<String, _>("date").map_err(ser)?)?;
    let sessions_count = u32_from_i64(
        "sessions_count",
        row.try_get::<i64, _>("sessions_count").map_err(ser)?,
    )?;
    let time_spent_seconds = u64_from_i64(
        "time_spent_seconds",
        row.try_get::<i64, _>("time_spent_seconds").map_err(ser)?,
    )?;

    Ok(DailyActivityRecord {
        date,
        sessions_count,
        time_spent_seconds,
    })
}
