//! Core progress tracking for BloomTrack.
//! This crate is the single source of truth for task and leveling rules.

pub mod auth;
pub mod config;
pub mod logging;
pub mod model;
pub mod progress;
pub mod service;
pub mod store;

pub use auth::{validate_sign_up, LoginGate};
pub use config::{CompletionPolicy, ConfigError, Credentials, TrackerConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::progress::{flower_stage_asset, LevelUpEvent, ProgressState};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use progress::engine::{submit, SubmitResult};
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::notifier::{LevelUpNotifier, LevelUpQueue};
pub use service::session::{Intent, IntentOutcome, TaskView, TrackerSession, TrackerSnapshot};
pub use service::day_cycle::SubmitOutcome;
pub use store::task_store::TaskStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
