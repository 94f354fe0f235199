//! Task record and title validation.
//!
//! # Responsibility
//! - Define the single persisted entity of the system.
//! - Normalize raw user input into a storable title.
//!
//! # Invariants
//! - `id` and `created_at` are assigned by the store and never change.
//! - `title` is immutable after creation; only `done` is mutable, via toggle.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the task store.
///
/// Issued monotonically by the storage engine; ids of deleted tasks are
/// never handed out again.
pub type TaskId = i64;

/// Maximum stored title length, counted in characters after trimming.
pub const TITLE_MAX_CHARS: usize = 256;

/// A single to-do item.
///
/// The store is the sole authority for `id` and `created_at`; the rest of
/// the core holds tasks by value and replaces whole records on reconcile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    /// Unix epoch milliseconds, set once at creation. Used only for
    /// ordering, never shown directly.
    pub created_at: i64,
}

impl Task {
    /// Returns whether this task belongs to the active partition.
    pub fn is_active(&self) -> bool {
        !self.done
    }
}

/// Rejection reasons for raw title input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty once surrounding whitespace is removed.
    EmptyTitle,
    /// Trimmed title exceeds [`TITLE_MAX_CHARS`].
    TooLong { chars: usize },
}

impl TaskValidationError {
    /// Stable machine-readable code for structured log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TooLong { .. } => "title_too_long",
        }
    }
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title is empty after trimming"),
            Self::TooLong { chars } => write!(
                f,
                "task title is {chars} characters, limit is {TITLE_MAX_CHARS}"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Trims a raw title and enforces the 1..=256 character contract.
///
/// Returns the storable form of the title. Validation always runs before
/// any store access, so invalid input never reaches SQLite.
pub fn normalize_title(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let chars = trimmed.chars().count();
    if chars > TITLE_MAX_CHARS {
        return Err(TaskValidationError::TooLong { chars });
    }
    Ok(trimmed.to_string())
}
