use async_trait::async_trait;
use codetrack_core::model::{
    AggregateStats, DailyActivityLog, DailyActivityRecord, ProgressState,
};

use super::mapping::{count_to_i64, iso_date, map_day_row, map_stats_row};
use super::SqliteRepository;
use crate::repository::{ProgressRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_progress(&self) -> Result<ProgressState, StorageError> {
        // Both reads run inside one transaction so the stats and the daily
        // rows come from a single snapshot; a save committing in between
        // must not be half-visible.
        let mut tx = self.pool().begin().await.map_err(conn)?;

        let stats_row = sqlx::query(
            r"
                SELECT
                    streak_days, total_sessions, total_time_spent_seconds,
                    best_quiz_score_percent, last_active_date
                FROM aggregate_stats
                WHERE id = 1
            ",
        )
        .fetch_optional(&mut *tx)
        .await
        .map_err(conn)?;

        // A record that cannot be mapped degrades to defaults rather than
        // failing the load; the stored data is the user's own and must never
        // brick the dashboard.
        let stats = match stats_row {
            None => AggregateStats::default(),
            Some(row) => match map_stats_row(&row) {
                Ok(stats) => stats,
                Err(err) => {
                    tracing::warn!("malformed aggregate stats, using defaults: {}", err);
                    AggregateStats::default()
                }
            },
        };

        let day_rows = sqlx::query(
            r"
                SELECT date, sessions_count, time_spent_seconds
                FROM daily_activity
            ",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(conn)?;

        tx.commit().await.map_err(conn)?;

        let mut records = Vec::with_capacity(day_rows.len());
        for row in &day_rows {
            match map_day_row(row) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!("skipping malformed daily activity row: {}", err);
                }
            }
        }

        Ok(ProgressState::new(
            stats,
            DailyActivityLog::from_records(records),
        ))
    }

    async fn save_progress(
        &self,
        stats: &AggregateStats,
        touched_day: Option<&DailyActivityRecord>,
    ) -> Result<(), StorageError> {
        let total_sessions = count_to_i64("total_sessions", stats.total_sessions())?;
        let total_time =
            count_to_i64("total_time_spent_seconds", stats.total_time_spent_seconds())?;
        let day_time = touched_day
            .map(|d| count_to_i64("time_spent_seconds", d.time_spent_seconds))
            .transpose()?;

        // One transaction covers the pair: a reader sees the stats update
        // together with its daily record, or neither.
        let mut tx = self.pool().begin().await.map_err(conn)?;

        sqlx::query(
            r"
                INSERT INTO aggregate_stats (
                    id, streak_days, total_sessions, total_time_spent_seconds,
                    best_quiz_score_percent, last_active_date
                )
                VALUES (1, ?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(id) DO UPDATE SET
                    streak_days = excluded.streak_days,
                    total_sessions = excluded.total_sessions,
                    total_time_spent_seconds = excluded.total_time_spent_seconds,
                    best_quiz_score_percent = excluded.best_quiz_score_percent,
                    last_active_date = excluded.last_active_date
            ",
        )
        .bind(i64::from(stats.streak_days()))
        .bind(total_sessions)
        .bind(total_time)
        .bind(i64::from(stats.best_quiz_score_percent()))
        .bind(stats.last_active_date().map(iso_date))
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        if let Some(day) = touched_day {
            sqlx::query(
                r"
                    INSERT INTO daily_activity (date, sessions_count, time_spent_seconds)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(date) DO UPDATE SET
                        sessions_count = excluded.sessions_count,
                        time_spent_seconds = excluded.time_spent_seconds
                ",
            )
            .bind(iso_date(day.date))
            .bind(i64::from(day.sessions_count))
            .bind(day_time.unwrap_or(0))
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
