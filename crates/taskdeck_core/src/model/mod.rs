//! Domain model for the task list core.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, repository and
//!   collection layers.
//! - Own title validation rules applied before any persistence.
//!
//! # Invariants
//! - Every task is identified by a store-assigned `TaskId` that is never
//!   reused or mutated.
//! - Stored titles are trimmed, non-empty and at most 256 characters.

pub mod task;
