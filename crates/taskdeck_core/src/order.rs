//! Presentation ordering policy.
//!
//! # Responsibility
//! - Compute the active-before-completed, newest-first display order.
//!
//! # Invariants
//! - Pure and stateless: the input slice is never mutated.
//! - Idempotent: reordering an already ordered list is a no-op.

use crate::model::task::Task;
use std::cmp::Ordering;

/// Orders tasks for display.
///
/// Active tasks come before completed ones; within each partition tasks are
/// sorted by creation time descending, with identical timestamps broken by
/// id descending so the order stays deterministic.
pub fn display_order(tasks: &[Task]) -> Vec<Task> {
    let (mut active, mut completed): (Vec<Task>, Vec<Task>) =
        tasks.iter().cloned().partition(Task::is_active);

    active.sort_by(newest_first);
    completed.sort_by(newest_first);

    active.append(&mut completed);
    active
}

fn newest_first(a: &Task, b: &Task) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
