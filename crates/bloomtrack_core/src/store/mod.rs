//! In-memory task storage.
//!
//! # Responsibility
//! - Own the ordered, bounded task collection for one session.
//! - Expose the only mutation paths for task completion flags.
//!
//! # Invariants
//! - Store size never exceeds the configured capacity.
//! - Invalid intents are silent no-ops, never errors.

pub mod task_store;
