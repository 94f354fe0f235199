//! Validating, error-translating task repository.
//!
//! # Responsibility
//! - Trim and validate titles before persistence.
//! - Map store failures onto the repository error taxonomy.
//! - Emit metadata-only diagnostic events for every operation.
//!
//! # Invariants
//! - Validation failures never reach the store.
//! - Failures have no side effects: the store is either fully updated or
//!   untouched.
//! - Log events carry metadata (ids, counts, durations), never title text.

use crate::model::task::{normalize_title, Task, TaskId, TaskValidationError};
use crate::store::task_store::{StoreError, TaskStore};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced to the presentation layer.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before any store access. Recoverable by re-prompting.
    Validation(TaskValidationError),
    /// Storage could not be prepared for use.
    InitializationFailed(StoreError),
    /// Reading the full task list failed.
    LoadFailed(StoreError),
    /// A create/toggle/delete round-trip failed at the store.
    Persistence(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InitializationFailed(err) => {
                write!(f, "task store initialization failed: {err}")
            }
            Self::LoadFailed(err) => write!(f, "failed to load tasks: {err}"),
            Self::Persistence(err) => write!(f, "task persistence failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InitializationFailed(err) | Self::LoadFailed(err) | Self::Persistence(err) => {
                Some(err)
            }
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Sole writer path to the task store.
///
/// Generic over the store contract so tests can substitute failing doubles.
pub struct TaskRepository<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Prepares the underlying store. Idempotent.
    pub async fn initialize(&self) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.store.initialize().await {
            Ok(()) => {
                info!(
                    "event=repo_init module=repo status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=repo_init module=repo status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(RepoError::InitializationFailed(err))
            }
        }
    }

    /// Loads every stored task. No side effects on failure.
    pub async fn load_all(&self) -> RepoResult<Vec<Task>> {
        let started_at = Instant::now();
        match self.store.list_all().await {
            Ok(tasks) => {
                info!(
                    "event=task_load module=repo status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(tasks)
            }
            Err(err) => {
                error!(
                    "event=task_load module=repo status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(RepoError::LoadFailed(err))
            }
        }
    }

    /// Trims and validates `raw_title`, then persists a new task.
    ///
    /// The returned record carries the store-assigned id and timestamp.
    pub async fn create(&self, raw_title: &str) -> RepoResult<Task> {
        let title = match normalize_title(raw_title) {
            Ok(title) => title,
            Err(err) => {
                warn!(
                    "event=task_create module=repo status=rejected reason={}",
                    err.code()
                );
                return Err(RepoError::Validation(err));
            }
        };

        let started_at = Instant::now();
        match self.store.insert(title.as_str()).await {
            Ok(task) => {
                info!(
                    "event=task_create module=repo status=ok id={} title_chars={} duration_ms={}",
                    task.id,
                    title.chars().count(),
                    started_at.elapsed().as_millis()
                );
                Ok(task)
            }
            Err(err) => {
                error!(
                    "event=task_create module=repo status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(RepoError::Persistence(err))
            }
        }
    }

    /// Persists a new completion flag and returns the updated record.
    pub async fn toggle(&self, id: TaskId, done: bool) -> RepoResult<Task> {
        let started_at = Instant::now();
        match self.store.set_done(id, done).await {
            Ok(task) => {
                info!(
                    "event=task_toggle module=repo status=ok id={id} done={done} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(task)
            }
            Err(err) => {
                error!(
                    "event=task_toggle module=repo status=error id={id} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(RepoError::Persistence(err))
            }
        }
    }

    /// Permanently deletes a task. Deletion is destructive and final.
    pub async fn remove(&self, id: TaskId) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.store.delete(id).await {
            Ok(()) => {
                info!(
                    "event=task_remove module=repo status=ok id={id} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=task_remove module=repo status=error id={id} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(RepoError::Persistence(err))
            }
        }
    }
}
