//! Tracker use-case services.
//!
//! # Responsibility
//! - Orchestrate task store mutations and progress updates per policy.
//! - Keep FFI/CLI adapters decoupled from policy details.
//!
//! # Invariants
//! - Each controller is the single writer of its store and progress state.
//! - Intents are applied one at a time, to completion.

pub mod auto_level;
pub mod clock;
pub mod day_cycle;
pub mod notifier;
pub mod session;
