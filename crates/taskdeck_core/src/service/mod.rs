//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and collection reconciliation into the
//!   operations the presentation layer consumes.
//! - Keep UI layers decoupled from storage details.

pub mod task_service;
