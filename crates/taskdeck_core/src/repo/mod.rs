//! Repository layer: the single gatekeeper between user intents and storage.
//!
//! # Responsibility
//! - Validate input before it reaches the store.
//! - Translate store failures into the errors the presentation layer sees.
//!
//! # Invariants
//! - No caller outside this layer touches the store directly.
//! - Every operation completes in total: success or a typed failure.

pub mod task_repo;
