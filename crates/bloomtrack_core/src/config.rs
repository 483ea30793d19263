//! Tracker configuration.
//!
//! # Responsibility
//! - Hold the tunable constants of a tracker session.
//! - Parse and validate JSON configuration supplied by the host app.
//!
//! # Invariants
//! - A validated config never has a zero capacity, threshold or stage count.
//! - Missing JSON fields fall back to `TrackerConfig::default()`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_MAX_TASKS: u32 = 6;
pub const DEFAULT_POINTS_PER_LEVEL: u32 = 5;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;
pub const DEFAULT_FLOWER_STAGES: u32 = 5;
const DEFAULT_CREDENTIAL: &str = "test";

/// How checked tasks are converted into levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Explicit day submit; completed tasks are banked as points.
    #[default]
    Submit,
    /// Level up automatically once every task is checked.
    Auto,
}

/// Fixed login pair accepted by `LoginGate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_CREDENTIAL.to_string(),
            password: DEFAULT_CREDENTIAL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub policy: CompletionPolicy,
    pub max_tasks: u32,
    pub points_per_level: u32,
    pub settle_delay_ms: u64,
    /// First day shown by the day cursor.
    pub epoch: NaiveDate,
    pub flower_stages: u32,
    pub credentials: Credentials,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            policy: CompletionPolicy::default(),
            max_tasks: DEFAULT_MAX_TASKS,
            points_per_level: DEFAULT_POINTS_PER_LEVEL,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            epoch: default_epoch(),
            flower_stages: DEFAULT_FLOWER_STAGES,
            credentials: Credentials::default(),
        }
    }
}

impl TrackerConfig {
    /// Parses a JSON config and validates it.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a config for `policy` with every other field defaulted.
    pub fn for_policy(policy: CompletionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tasks == 0 {
            return Err(ConfigError::ZeroField("max_tasks"));
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::ZeroField("points_per_level"));
        }
        if self.flower_stages == 0 {
            return Err(ConfigError::ZeroField("flower_stages"));
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    ZeroField(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid tracker config: {err}"),
            Self::ZeroField(field) => write!(f, "`{field}` must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::ZeroField(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{CompletionPolicy, ConfigError, TrackerConfig};
    use chrono::NaiveDate;

    #[test]
    fn defaults_match_submit_variant() {
        let config = TrackerConfig::default();
        assert_eq!(config.policy, CompletionPolicy::Submit);
        assert_eq!(config.max_tasks, 6);
        assert_eq!(config.points_per_level, 5);
        assert_eq!(config.settle_delay_ms, 300);
        assert_eq!(config.epoch, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config = TrackerConfig::from_json_str(r#"{"policy":"auto","max_tasks":3}"#)
            .expect("partial config should parse");
        assert_eq!(config.policy, CompletionPolicy::Auto);
        assert_eq!(config.max_tasks, 3);
        assert_eq!(config.points_per_level, 5);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let err = TrackerConfig::from_json_str(r#"{"points_per_level":0}"#)
            .expect_err("zero threshold must fail");
        assert!(matches!(err, ConfigError::ZeroField("points_per_level")));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let err = TrackerConfig::from_json_str(r#"{"policy":"weekly"}"#)
            .expect_err("unknown policy must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
