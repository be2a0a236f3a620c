use sqlx::SqlitePool;

use super::SqliteInitError;

/// Statements for schema version 1: the singleton stats row, the per-day
/// activity table keyed by ISO date, and the singleton saved snippet.
const V1: &[&str] = &[
    r"
        CREATE TABLE aggregate_stats (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            streak_days INTEGER NOT NULL CHECK (streak_days >= 0),
            total_sessions INTEGER NOT NULL CHECK (total_sessions >= 0),
            total_time_spent_seconds INTEGER NOT NULL
                CHECK (total_time_spent_seconds >= 0),
            best_quiz_score_percent INTEGER NOT NULL
                CHECK (best_quiz_score_percent BETWEEN 0 AND 100),
            last_active_date TEXT
        );
    ",
    r"
        CREATE TABLE daily_activity (
            date TEXT PRIMARY KEY,
            sessions_count INTEGER NOT NULL CHECK (sessions_count >= 0),
            time_spent_seconds INTEGER NOT NULL CHECK (time_spent_seconds >= 0)
        );
    ",
    r"
        CREATE TABLE saved_snippets (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            code TEXT NOT NULL,
            language TEXT NOT NULL,
            saved_at TEXT NOT NULL
        );
    ",
];

const CURRENT_VERSION: i64 = 1;

async fn schema_version(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let version: (i64,) = sqlx::query_as("PRAGMA user_version;").fetch_one(pool).await?;
    Ok(version.0)
}

/// Migrates the schema up to [`CURRENT_VERSION`], tracked through SQLite's
/// `user_version` pragma. Each version runs inside one transaction, so a
/// failed migration leaves the previous version intact.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    if schema_version(pool).await? >= CURRENT_VERSION {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for statement in V1 {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    // PRAGMA does not support bind parameters.
    sqlx::query(&format!("PRAGMA user_version = {CURRENT_VERSION};"))
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(())
}
