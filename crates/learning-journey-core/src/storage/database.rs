//! SQLite-backed persistence for the streak engine.
//!
//! Provides:
//! - Key-value store holding the serialized engine snapshot
//! - Append-only event log of everything the engine reported

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::{data_dir, SnapshotStore};
use crate::error::{DatabaseError, Result};
use crate::events::Event;
use crate::streak::StreakSnapshot;

const SNAPSHOT_KEY: &str = "streak_snapshot";
const DB_FILE_NAME: &str = "learning-journey.db";

/// One row of the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub event: Event,
}

/// SQLite database for engine state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/learning-journey.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join(DB_FILE_NAME);
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests and throwaway sessions).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> std::result::Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS events (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                recorded_at TEXT NOT NULL,
                payload     TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_recorded_at ON events(recorded_at);",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> std::result::Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> std::result::Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> std::result::Result<(), rusqlite::Error> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Append an engine event to the log.
    ///
    /// # Errors
    /// Returns an error if the event cannot be serialized or inserted.
    pub fn append_event(&self, event: &Event, recorded_at: DateTime<Utc>) -> Result<i64> {
        let payload = serde_json::to_string(event)?;
        self.conn.execute(
            "INSERT INTO events (recorded_at, payload) VALUES (?1, ?2)",
            params![recorded_at.to_rfc3339(), payload],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent events, newest first.
    pub fn recent_events(&self, limit: u32) -> Result<Vec<EventRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, recorded_at, payload FROM events ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, recorded_at, payload) = row?;
            let recorded_at = DateTime::parse_from_rfc3339(&recorded_at)
                .map_err(|e| DatabaseError::QueryFailed(format!("bad recorded_at '{recorded_at}': {e}")))?
                .with_timezone(&Utc);
            records.push(EventRecord {
                id,
                recorded_at,
                event: serde_json::from_str(&payload)?,
            });
        }
        Ok(records)
    }

    /// Drop the stored snapshot and the event log.
    pub fn clear(&self) -> Result<()> {
        self.kv_delete(SNAPSHOT_KEY)?;
        self.conn.execute("DELETE FROM events", [])?;
        Ok(())
    }
}

impl SnapshotStore for Database {
    fn load_snapshot(&self) -> Result<Option<StreakSnapshot>> {
        match self.kv_get(SNAPSHOT_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, snapshot: &StreakSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.kv_set(SNAPSHOT_KEY, &json)?;
        Ok(())
    }
}
