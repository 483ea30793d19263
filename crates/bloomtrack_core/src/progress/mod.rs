//! Progress engine.
//!
//! # Responsibility
//! - Convert completed-task counts into points and levels (submit policy).
//! - Detect rising edges of the "every task checked" condition (auto policy).
//!
//! # Invariants
//! - Engine functions are pure; callers own and apply the resulting state.

pub mod edge;
pub mod engine;

pub use edge::{Edge, FullClearDetector};
pub use engine::{submit, SubmitResult};
