use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::Local;
use sqlx::{
    Connection, SqliteConnection,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use tracing::debug;

use crate::RequestRecord;

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS requests (date text, city text, weather text)";

/// Append-only log of served lookups, backed by a SQLite file.
///
/// Every call opens its own connection and drops it when done.
#[derive(Debug, Clone)]
pub struct RequestLog {
    path: PathBuf,
}

impl RequestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete)
            .busy_timeout(Duration::from_secs(5));

        SqliteConnection::connect_with(&options)
            .await
            .with_context(|| format!("Failed to open request log: {}", self.path.display()))
    }

    /// Creates the `requests` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        sqlx::query(CREATE_TABLE)
            .execute(&mut conn)
            .await
            .context("Failed to create requests table")?;
        conn.close().await.ok();

        debug!(path = %self.path.display(), "request log ready");
        Ok(())
    }

    /// Appends one record stamped with the current local time.
    pub async fn record(&self, city: &str, weather: &str) -> Result<()> {
        let date = Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string();

        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await.context("Failed to begin request log transaction")?;
        sqlx::query("INSERT INTO requests VALUES (?, ?, ?)")
            .bind(&date)
            .bind(city)
            .bind(weather)
            .execute(&mut *tx)
            .await
            .context("Failed to insert request record")?;
        tx.commit().await.context("Failed to commit request record")?;
        conn.close().await.ok();

        Ok(())
    }

    /// Most recent records, returned oldest first.
    pub async fn records(&self, limit: u32) -> Result<Vec<RequestRecord>> {
        let mut conn = self.connect().await?;
        let mut rows = sqlx::query_as::<_, RequestRecord>(
            "SELECT date, city, weather FROM requests ORDER BY rowid DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&mut conn)
        .await
        .context("Failed to read request records")?;
        conn.close().await.ok();

        rows.reverse();
        Ok(rows)
    }
}
