//! SQLite-backed task store.
//!
//! # Design
//! `TaskStore` is the persistence collaborator for the HTTP layer: it owns id
//! assignment (AUTOINCREMENT) and timestamp maintenance, so callers never
//! fabricate either. Filtering happens here as well, built from an explicit
//! `TaskFilter` value rather than a shared mutable query builder.

use chrono::{SecondsFormat, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

/// A single task row as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Criteria for the list operation. `None` fields are not applied; present
/// fields combine with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub completed: Option<bool>,
}

/// Errors surfaced by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No task with the requested id exists.
    #[error("task not found")]
    NotFound,

    /// The underlying database could not be reached or errored.
    #[error(transparent)]
    Db(#[from] rusqlite::Error),
}

const SELECT_COLUMNS: &str = "id, name, completed, created_at, updated_at";

pub struct TaskStore {
    conn: Mutex<Connection>,
}

impl TaskStore {
    /// Open (or create) the database at `path` and bootstrap the schema.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::with_connection(conn)
    }

    /// Fully in-memory store, used by tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
      CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
      );
      "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let conn = self.conn.lock().await;

        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<SqlValue> = Vec::new();
        if let Some(search) = &filter.search {
            conditions.push("LOWER(name) LIKE ?");
            values.push(SqlValue::from(format!("%{}%", search.to_lowercase())));
        }
        if let Some(completed) = filter.completed {
            conditions.push("completed = ?");
            values.push(SqlValue::from(i64::from(completed)));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("SELECT {SELECT_COLUMNS} FROM tasks {where_clause} ORDER BY id");

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(from_row(row)?);
        }
        Ok(tasks)
    }

    pub async fn create(&self, name: &str, completed: bool) -> Result<Task, StoreError> {
        let conn = self.conn.lock().await;
        let now = now_timestamp();
        conn.execute(
            "INSERT INTO tasks (name, completed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, completed, now, now],
        )?;
        let id = conn.last_insert_rowid();
        fetch(&conn, id)?.ok_or(StoreError::NotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Task, StoreError> {
        let conn = self.conn.lock().await;
        fetch(&conn, id)?.ok_or(StoreError::NotFound)
    }

    /// Partial merge: `None` fields keep their stored values. `updated_at`
    /// refreshes on every successful update.
    pub async fn update(
        &self,
        id: i64,
        name: Option<String>,
        completed: Option<bool>,
    ) -> Result<Task, StoreError> {
        let conn = self.conn.lock().await;
        let mut task = fetch(&conn, id)?.ok_or(StoreError::NotFound)?;
        if let Some(name) = name {
            task.name = name;
        }
        if let Some(completed) = completed {
            task.completed = completed;
        }
        task.updated_at = now_timestamp();
        conn.execute(
            "UPDATE tasks SET name = ?1, completed = ?2, updated_at = ?3 WHERE id = ?4",
            params![task.name, task.completed, task.updated_at, task.id],
        )?;
        Ok(task)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        let changes = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if changes == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Insert the sample tasks used for demos and manual testing.
    pub async fn seed(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        let samples = [
            ("Do the laundry", true),
            ("Get gas", false),
            ("Clean the yard", false),
            ("Water the plants", true),
            ("Do the shopping", true),
        ];
        let now = now_timestamp();
        for (name, completed) in samples {
            conn.execute(
                "INSERT INTO tasks (name, completed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
                params![name, completed, now, now],
            )?;
        }
        Ok(())
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Task>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM tasks WHERE id = ?1"
    ))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(from_row(row)?)),
        None => Ok(None),
    }
}

fn from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        completed: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
