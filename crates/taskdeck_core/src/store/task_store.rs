//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the async CRUD surface over the `tasks` table.
//! - Assign task identity (`AUTOINCREMENT`) and creation timestamps.
//!
//! # Invariants
//! - Ids are issued monotonically and never reused after deletion.
//! - Every write either fully persists or surfaces a typed error.
//! - All SQLite work runs on the blocking pool behind one connection mutex,
//!   so writes are observed in dispatch order.

use crate::db::migrations::apply_migrations;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::task::{Task, TaskId};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const TASK_SELECT_SQL: &str = "SELECT id, title, done, created_at FROM tasks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by the durable task store.
#[derive(Debug)]
pub enum StoreError {
    /// The id does not exist (never issued, or already deleted).
    NotFound(TaskId),
    /// The storage medium cannot be opened or prepared.
    Unavailable(DbError),
    /// An I/O-level read or write failure.
    Write(DbError),
    /// The blocking storage worker did not run to completion. Only happens
    /// when the runtime tears down mid-operation, so it cannot be produced
    /// in-process by tests; callers treat it like a write failure.
    Interrupted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Unavailable(err) => write!(f, "task store unavailable: {err}"),
            Self::Write(err) => write!(f, "task store write failed: {err}"),
            Self::Interrupted => write!(f, "task store operation interrupted before completion"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) | Self::Write(err) => Some(err),
            Self::NotFound(_) | Self::Interrupted => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Write(DbError::Sqlite(value))
    }
}

/// Persistence contract consumed by the task repository.
///
/// Row ordering is unspecified; presentation order is the ordering policy's
/// job, not the store's.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Prepares storage for use. Idempotent.
    async fn initialize(&self) -> StoreResult<()>;

    /// Returns every stored task.
    async fn list_all(&self) -> StoreResult<Vec<Task>>;

    /// Persists a new task with a fresh id, `done = false` and the current
    /// creation timestamp, returning the full record.
    async fn insert(&self, title: &str) -> StoreResult<Task>;

    /// Persists a new `done` value for an existing row and returns the
    /// updated record.
    async fn set_done(&self, id: TaskId, done: bool) -> StoreResult<Task>;

    /// Permanently removes a row. No tombstone, no recovery.
    async fn delete(&self, id: TaskId) -> StoreResult<()>;
}

/// SQLite-backed task store.
///
/// Cheap to clone; clones share the underlying connection.
#[derive(Clone)]
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTaskStore {
    /// Opens (creating when absent) a file-backed store.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let conn = tokio::task::spawn_blocking(move || open_db(path))
            .await
            .map_err(|_| StoreError::Interrupted)?;
        Self::from_conn(conn)
    }

    /// Opens an in-memory store. Intended for tests.
    pub async fn in_memory() -> StoreResult<Self> {
        let conn = tokio::task::spawn_blocking(open_db_in_memory)
            .await
            .map_err(|_| StoreError::Interrupted)?;
        Self::from_conn(conn)
    }

    fn from_conn(conn: Result<Connection, DbError>) -> StoreResult<Self> {
        let conn = conn.map_err(StoreError::Unavailable)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs a closure against the connection on the blocking pool.
    ///
    /// The mutex serializes all storage work, which is the single-writer
    /// discipline the concurrency model relies on.
    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.blocking_lock();
            op(&mut conn)
        })
        .await
        .map_err(|_| StoreError::Interrupted)?
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn initialize(&self) -> StoreResult<()> {
        self.run(|conn| apply_migrations(conn).map_err(StoreError::Unavailable))
            .await
    }

    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        self.run(|conn| {
            let mut stmt = conn.prepare(TASK_SELECT_SQL)?;
            let rows = stmt.query_map([], task_from_row)?;
            let mut tasks = Vec::new();
            for task in rows {
                tasks.push(task?);
            }
            Ok(tasks)
        })
        .await
    }

    async fn insert(&self, title: &str) -> StoreResult<Task> {
        let title = title.to_string();
        self.run(move |conn| {
            let created_at = Utc::now().timestamp_millis();
            conn.execute(
                "INSERT INTO tasks (title, done, created_at) VALUES (?1, 0, ?2);",
                params![title, created_at],
            )?;

            let id = conn.last_insert_rowid();
            // Read back instead of assembling in memory so the returned
            // record is exactly what the row holds.
            let task = conn.query_row(
                &format!("{TASK_SELECT_SQL} WHERE id = ?1;"),
                [id],
                task_from_row,
            )?;
            Ok(task)
        })
        .await
    }

    async fn set_done(&self, id: TaskId, done: bool) -> StoreResult<Task> {
        self.run(move |conn| {
            let changed = conn.execute(
                "UPDATE tasks SET done = ?1 WHERE id = ?2;",
                params![done, id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }

            let task = conn.query_row(
                &format!("{TASK_SELECT_SQL} WHERE id = ?1;"),
                [id],
                task_from_row,
            )?;
            Ok(task)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> StoreResult<()> {
        self.run(move |conn| {
            let changed = conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        done: row.get(2)?,
        created_at: row.get(3)?,
    })
}
