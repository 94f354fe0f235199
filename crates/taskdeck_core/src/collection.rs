//! In-memory task projection.
//!
//! # Responsibility
//! - Hold the render-ready view of all tasks for the running process.
//! - Apply store-confirmed mutations by value.
//!
//! # Invariants
//! - One entry per task id.
//! - Mutation happens only through the service's confirmed-intent paths;
//!   the collection itself never talks to storage.

use crate::model::task::{Task, TaskId};

/// Single-writer container over the task list.
///
/// Insertion order is preserved as-is; presentation order is computed
/// separately by the ordering policy. Value equality makes rollback
/// verification cheap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole projection with a freshly loaded snapshot.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Inserts a newly committed task at the head.
    pub fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Replaces the entry matching the record's id with the store's version.
    ///
    /// When no entry matches (the projection lagged behind the store) the
    /// record is inserted at the head instead. Returns `true` when an
    /// existing entry was replaced.
    pub fn commit_update(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|entry| entry.id == task.id) {
            Some(entry) => {
                *entry = task;
                true
            }
            None => {
                self.prepend(task);
                false
            }
        }
    }

    /// Removes the entry with the given id. Returns `true` when present.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
