//! Storage layer for dentalcare.
//!
//! A single `kv_store` table holds the three entity collections plus the
//! backup history, each as a JSON-serialized array under a fixed key.

mod schema;

pub use schema::*;

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Storage keys, one per persisted collection.
pub mod keys {
    pub const PATIENTS: &str = "dentalcare_patients";
    pub const APPOINTMENTS: &str = "dentalcare_appointments";
    pub const TREATMENTS: &str = "dentalcare_treatments";
    pub const BACKUP_HISTORY: &str = "dentalcare_backup_history";
}

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn get_raw(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    /// Read a collection. A missing key is an empty collection; a corrupt
    /// value degrades to empty rather than failing the caller.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> DbResult<Vec<T>> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable collection");
                Ok(Vec::new())
            }
        }
    }

    /// Write a collection, replacing whatever the key held.
    pub fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> DbResult<()> {
        let raw = serde_json::to_string(items)?;
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            rusqlite::params![key, raw],
        )?;
        Ok(())
    }

    /// Remove a key outright.
    pub fn remove(&self, key: &str) -> DbResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?", [key])?;
        Ok(())
    }
}
