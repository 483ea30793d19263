//! Domain model for the habit tracker.
//!
//! # Responsibility
//! - Define the task record and progress state used by core logic.
//! - Keep presentation-facing derivations (segments, flower asset) next to
//!   the state they derive from.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - `ProgressState::points` is always below the configured points-per-level.

pub mod progress;
pub mod task;
