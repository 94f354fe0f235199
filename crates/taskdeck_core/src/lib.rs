//! Synchronization core for the taskdeck task list.
//!
//! This crate is the single source of truth for business invariants: title
//! validation, identity assignment, the optimistic-collection reconciliation
//! rules and the presentation ordering policy. Rendering is someone else's
//! job; the presentation layer calls [`TaskService`] and draws whatever state
//! it exposes.

pub mod collection;
pub mod db;
pub mod logging;
pub mod model;
pub mod order;
pub mod repo;
pub mod service;
pub mod store;

pub use collection::TaskCollection;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{normalize_title, Task, TaskId, TaskValidationError, TITLE_MAX_CHARS};
pub use order::display_order;
pub use repo::task_repo::{RepoError, RepoResult, TaskRepository};
pub use service::task_service::{IntentPhase, TaskService};
pub use store::task_store::{SqliteTaskStore, StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
