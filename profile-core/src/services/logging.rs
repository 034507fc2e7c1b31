//! Event log - a local history of what the controller did
//!
//! Entries live in logs.duckdb inside the profile directory. Only event
//! names, endpoint paths, the CLI command and error summaries are stored;
//! user and project payloads never reach this table.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use duckdb::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::log_migrations::LOG_MIGRATIONS;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Disambiguates ids minted within the same millisecond
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp in the high bits, a wrapping 16-bit sequence below
fn next_entry_id() -> u64 {
    let millis = now_ms().max(0) as u64;
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (millis << 16) | seq
}

/// Current unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Timestamp `days` before `now`, or `None` when it does not fit in an i64
pub fn days_before(now: i64, days: u64) -> Option<i64> {
    let days = i64::try_from(days).ok()?;
    now.checked_sub(days.checked_mul(MILLIS_PER_DAY)?)
}

/// Where the event log is being written from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    Embedded,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Embedded => "embedded",
        }
    }
}

/// An event waiting to be written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LogEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            endpoint: None,
            command: None,
            error_message: None,
        }
    }

    /// Backend path the event concerns, e.g. "/user"
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// A stored event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub endpoint: Option<String>,
    pub command: Option<String>,
    pub error_message: Option<String>,
}

impl LogEntry {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            timestamp: row.get("timestamp")?,
            entry_point: row.get("entry_point")?,
            app_version: row.get("app_version")?,
            platform: row.get("platform")?,
            event: row.get("event")?,
            endpoint: row.get("endpoint")?,
            command: row.get("command")?,
            error_message: row.get("error_message")?,
        })
    }
}

/// Which entries a query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    All,
    ErrorsOnly,
}

impl EntryFilter {
    fn where_clause(&self) -> &'static str {
        match self {
            EntryFilter::All => "",
            EntryFilter::ErrorsOnly => "WHERE error_message IS NOT NULL",
        }
    }
}

/// Handle on logs.duckdb
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
}

impl LoggingService {
    /// Open (or create) the event log in `profile_dir`
    pub fn new(
        profile_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let db_path = profile_dir.join("logs.duckdb");
        let conn = Connection::open(&db_path)?;
        apply_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::database(format!("Event log lock poisoned: {}", e)))
    }

    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO sys_logs (id, timestamp, entry_point, app_version, platform, \
             event, endpoint, command, error_message) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            duckdb::params![
                next_entry_id(),
                now_ms(),
                self.entry_point.as_str(),
                &self.app_version,
                std::env::consts::OS,
                &event.event,
                &event.endpoint,
                &event.command,
                &event.error_message,
            ],
        )?;
        Ok(())
    }

    /// Write several events in order, stopping at the first failure
    pub fn log_all(&self, events: impl IntoIterator<Item = LogEvent>) -> Result<()> {
        events.into_iter().try_for_each(|event| self.log(event))
    }

    /// Newest entries first
    pub fn entries(&self, filter: EntryFilter, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.connection()?;
        let sql = format!(
            "SELECT * FROM sys_logs {} ORDER BY timestamp DESC, id DESC LIMIT ?",
            filter.where_clause()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([limit as i64], LogEntry::from_row)?;
        Ok(rows.collect::<duckdb::Result<Vec<_>>>()?)
    }

    pub fn count(&self, filter: EntryFilter) -> Result<u64> {
        let conn = self.connection()?;
        let sql = format!("SELECT COUNT(*) FROM sys_logs {}", filter.where_clause());
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Number of entries that carry an error
    pub fn count_errors(&self) -> Result<u64> {
        self.count(EntryFilter::ErrorsOnly)
    }

    /// Remove entries older than `timestamp_ms`; returns how many went
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.connection()?;
        let deleted = conn.execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    /// Checkpoint and copy the database file to `destination`
    pub fn export(&self, destination: &Path) -> Result<u64> {
        let conn = self.connection()?;
        conn.execute_batch("CHECKPOINT")?;
        Ok(std::fs::copy(&self.db_path, destination)?)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Apply every embedded migration not yet recorded in `sys_migrations`
fn apply_migrations(conn: &Connection) -> Result<()> {
    let (bootstrap, rest) = LOG_MIGRATIONS
        .split_first()
        .ok_or_else(|| Error::database("No event log migrations embedded"))?;
    // The bootstrap script only creates sys_migrations and is idempotent
    conn.execute_batch(bootstrap.1)?;

    for (name, sql) in rest {
        let applied: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM sys_migrations WHERE migration_name = ?",
            [*name],
            |row| row.get(0),
        )?;
        if applied {
            continue;
        }
        conn.execute_batch(sql)?;
        conn.execute("INSERT INTO sys_migrations (migration_name) VALUES (?)", [*name])?;
    }
    Ok(())
}
