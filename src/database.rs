use crate::dlog;
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::Path;

/// Named text slots that survive between sessions.
///
/// An absent slot is `Ok(None)`, never an error.
pub trait SnapshotSlot {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// Slots kept in a single SQLite key/value table.
pub struct SqliteSlots {
    conn: Connection,
}

impl SqliteSlots {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "opened workout database");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        if !table_exists(&conn, "local_storage")? {
            dlog!("creating local_storage table");
            conn.execute_batch(
                r"
                CREATE TABLE local_storage (
                  key         TEXT PRIMARY KEY,
                  value       TEXT NOT NULL,
                  updated_at  TEXT NOT NULL
                );
                ",
            )?;
        }
        Ok(Self { conn })
    }
}

impl SnapshotSlot for SqliteSlots {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            r"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET
              value = excluded.value,
              updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;
        dlog!("slot_saved key={key} bytes={}", value.len());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
        dlog!("slot_deleted key={key} rows={n}");
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}
