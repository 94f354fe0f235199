//! Durable task storage.
//!
//! # Responsibility
//! - Define the persistence contract the repository mediates.
//! - Keep SQLite query details inside the storage boundary.
//!
//! # Invariants
//! - The store is the sole authority for task identity and creation time.
//! - Deleting an absent id surfaces `NotFound`, never silent success.

pub mod task_store;
