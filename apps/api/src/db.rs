use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::sql::fold;

/// Creates a SQLite connection pool and applies pending migrations.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    info!("Connecting to SQLite at {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to apply database migrations")?;
    backfill_folded_text(pool)
        .await
        .context("Failed to backfill search columns")?;
    Ok(())
}

/// Searchable `(table, column)` pairs, each with a `<column>_folded` companion.
const FOLDED_COLUMNS: &[(&str, &str)] = &[
    ("companies", "name"),
    ("contacts", "name"),
    ("contacts", "email"),
    ("contacts", "title"),
    ("applications", "job_title"),
    ("applications", "location"),
];

/// Fills folded search columns for rows written before they existed.
pub async fn backfill_folded_text(pool: &SqlitePool) -> Result<u64, AppError> {
    let mut filled = 0;
    for (table, column) in FOLDED_COLUMNS {
        let rows: Vec<(String, String)> = sqlx::query_as(&format!(
            "SELECT id, {column} FROM {table} \
             WHERE {column} IS NOT NULL AND {column}_folded IS NULL"
        ))
        .fetch_all(pool)
        .await?;

        for (id, text) in rows {
            sqlx::query(&format!("UPDATE {table} SET {column}_folded = ? WHERE id = ?"))
                .bind(fold(&text))
                .bind(id)
                .execute(pool)
                .await?;
            filled += 1;
        }
    }

    if filled > 0 {
        info!("Backfilled {filled} folded search value(s)");
    }
    Ok(filled)
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fixed-width RFC 3339 text so that `ORDER BY created_at` sorts chronologically.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn now() -> String {
    timestamp(Utc::now())
}

/// Parses an ISO-8601 date from the API boundary.
/// Accepts a full RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(field: &str, raw: &str) -> Result<String, AppError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp(dt.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(timestamp(midnight.and_utc()));
        }
    }
    Err(AppError::Validation(format!(
        "{field} must be an ISO-8601 date (YYYY-MM-DD or RFC 3339), got '{raw}'"
    )))
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory url")
        .foreign_keys(true);
    // One connection: every in-memory connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory sqlite");
    run_migrations(&pool).await.expect("migrations");
    pool
}
