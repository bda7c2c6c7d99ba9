//! SQLite-based question/answer history.
//!
//! Append-only log of every answered question, including degraded answers.
//! Read back newest-first. Durable across restarts.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// A recorded question/answer exchange.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// History log backed by SQLite.
///
/// The connection sits behind a mutex so concurrent request handlers
/// serialize their appends; each append is atomic and gets a unique
/// increasing id.
pub struct HistoryStore {
    conn: Mutex<Connection>,
}

impl HistoryStore {
    /// Open or create a history store at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open history store at {:?}", path))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// In-memory store, for tests and one-shot CLI runs without persistence.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory history")?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS qa_history (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer   TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    /// Append a question/answer pair. Entries are never updated afterwards.
    pub fn append(&self, question: &str, answer: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO qa_history (question, answer) VALUES (?1, ?2)",
            params![question, answer],
        )
        .context("Failed to append to history")?;

        Ok(())
    }

    /// All recorded pairs, most recent first.
    pub fn list(&self) -> Result<Vec<QaPair>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT question, answer FROM qa_history ORDER BY id DESC")?;

        let rows = stmt.query_map([], |row| {
            Ok(QaPair {
                question: row.get(0)?,
                answer: row.get(1)?,
            })
        })?;

        let mut pairs = Vec::new();
        for row in rows {
            pairs.push(row?);
        }

        Ok(pairs)
    }

    /// Number of recorded pairs.
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM qa_history", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Administrative bulk clear. Not part of normal operation.
    pub fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM qa_history", [])?;
        Ok(())
    }
}
