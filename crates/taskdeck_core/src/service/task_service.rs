//! Task intent orchestration.
//!
//! # Responsibility
//! - Expose the core's operations to the presentation layer.
//! - Reconcile the in-memory collection with repository results.
//!
//! # Invariants
//! - The collection mutates only after the store has confirmed an intent;
//!   a failed intent leaves it value-identical to before the call.
//! - Mutating intents take `&mut self`, so intents on one service settle in
//!   dispatch order. Same-id operations can never reorder or coalesce.
//! - No cancellation and no automatic retry: a retry is a fresh call.

use crate::collection::TaskCollection;
use crate::model::task::{normalize_title, Task, TaskId};
use crate::order::display_order;
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use crate::store::task_store::{StoreError, TaskStore};
use log::{info, warn};

/// Lifecycle of one mutating intent.
///
/// The reference flow never mutates the collection before confirmation, so
/// `RolledBack` means "nothing was applied", not "an edit was undone".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentPhase {
    /// Repository call dispatched, collection untouched.
    Pending,
    /// Store confirmed; the collection matches the store again.
    Committed,
    /// Store refused; the collection kept its last-known-good state.
    RolledBack,
}

impl IntentPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }
}

/// Owns the collection and drives every user intent through the repository.
///
/// This is the only boundary the presentation layer calls.
pub struct TaskService<S: TaskStore> {
    repo: TaskRepository<S>,
    collection: TaskCollection,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(repo: TaskRepository<S>) -> Self {
        Self {
            repo,
            collection: TaskCollection::new(),
        }
    }

    /// Prepares the underlying storage. Idempotent.
    pub async fn initialize(&self) -> RepoResult<()> {
        self.repo.initialize().await
    }

    /// Reloads the collection from the store.
    ///
    /// On failure the collection keeps its previous contents; a retry is an
    /// explicit new call.
    pub async fn reload(&mut self) -> RepoResult<&[Task]> {
        let tasks = self.repo.load_all().await?;
        self.collection.replace_all(tasks);
        Ok(self.collection.tasks())
    }

    /// Creates a task and, once the store confirms, prepends it.
    ///
    /// No provisional entry is inserted while the call is in flight: the
    /// collection only ever shows records the store has confirmed.
    pub async fn create(&mut self, raw_title: &str) -> RepoResult<Task> {
        // The repository rejects invalid titles before any store dispatch;
        // mirror that check so a rejected create never reports a Pending
        // phase or a rollback for a call that was never in flight. The
        // repository logs the rejection itself.
        let dispatched = normalize_title(raw_title).is_ok();
        if dispatched {
            log_phase("intent_add", IntentPhase::Pending);
        }
        match self.repo.create(raw_title).await {
            Ok(task) => {
                self.collection.prepend(task.clone());
                info!(
                    "event=intent_add module=service phase={} id={}",
                    IntentPhase::Committed.as_str(),
                    task.id
                );
                Ok(task)
            }
            Err(err) => {
                if dispatched {
                    log_rollback("intent_add", &err);
                }
                Err(err)
            }
        }
    }

    /// Sets a task's completion flag once the store confirms it.
    pub async fn toggle(&mut self, id: TaskId, done: bool) -> RepoResult<Task> {
        log_phase("intent_toggle", IntentPhase::Pending);
        match self.repo.toggle(id, done).await {
            Ok(task) => {
                self.collection.commit_update(task.clone());
                info!(
                    "event=intent_toggle module=service phase={} id={id} done={done}",
                    IntentPhase::Committed.as_str()
                );
                Ok(task)
            }
            Err(err) => {
                self.drop_if_stale(id, &err);
                log_rollback("intent_toggle", &err);
                Err(err)
            }
        }
    }

    /// Deletes a task; the collection entry is removed only on success.
    ///
    /// Any "are you sure" interaction lives in the presentation layer and
    /// must call this exactly once, after confirmation.
    pub async fn remove(&mut self, id: TaskId) -> RepoResult<()> {
        log_phase("intent_delete", IntentPhase::Pending);
        match self.repo.remove(id).await {
            Ok(()) => {
                self.collection.remove(id);
                info!(
                    "event=intent_delete module=service phase={} id={id}",
                    IntentPhase::Committed.as_str()
                );
                Ok(())
            }
            Err(err) => {
                self.drop_if_stale(id, &err);
                log_rollback("intent_delete", &err);
                Err(err)
            }
        }
    }

    /// Returns the collection in presentation order. Pure; no mutation.
    pub fn display(&self) -> Vec<Task> {
        display_order(self.collection.tasks())
    }

    /// Raw collection view in insertion order.
    pub fn tasks(&self) -> &[Task] {
        self.collection.tasks()
    }

    pub fn collection(&self) -> &TaskCollection {
        &self.collection
    }

    /// A store-side `NotFound` means our entry refers to a row that no
    /// longer exists; drop the stale entry before surfacing the error.
    fn drop_if_stale(&mut self, id: TaskId, err: &RepoError) {
        if matches!(err, RepoError::Persistence(StoreError::NotFound(_))) && self.collection.remove(id)
        {
            warn!("event=stale_entry_dropped module=service id={id}");
        }
    }
}

fn log_phase(event: &str, phase: IntentPhase) {
    info!("event={event} module=service phase={}", phase.as_str());
}

fn log_rollback(event: &str, err: &RepoError) {
    warn!(
        "event={event} module=service phase={} error={err}",
        IntentPhase::RolledBack.as_str()
    );
}
