//! Progress state and its presentation projections.
//!
//! # Invariants
//! - `level` starts at 1 and never decreases.
//! - `points` is a remainder below the configured points-per-level.

use serde::{Deserialize, Serialize};

/// Level every tracker starts at.
pub const STARTING_LEVEL: u32 = 1;

const FLOWER_ASSET_PREFIX: &str = "stage";
const FLOWER_ASSET_SUFFIX: &str = "_lily";

/// Banked points plus the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub points: u32,
    pub level: u32,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            points: 0,
            level: STARTING_LEVEL,
        }
    }
}

impl ProgressState {
    /// One flag per progress-bar segment; filled while `index < points`.
    pub fn progress_segments(&self, points_per_level: u32) -> Vec<bool> {
        (0..points_per_level).map(|i| i < self.points).collect()
    }

    /// Completed tasks still needed before the next level-up.
    pub fn tasks_until_next_level(&self, points_per_level: u32) -> u32 {
        points_per_level.saturating_sub(self.points)
    }
}

/// Notification emitted once per committed level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpEvent {
    pub previous_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
}

/// Returns the flower artwork key for `level`.
///
/// Levels without artwork fall back to the first stage.
pub fn flower_stage_asset(level: u32, stage_count: u32) -> String {
    let stage = if (1..=stage_count).contains(&level) {
        level
    } else {
        1
    };
    format!("{FLOWER_ASSET_PREFIX}{stage}{FLOWER_ASSET_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::{flower_stage_asset, ProgressState};

    #[test]
    fn segments_fill_up_to_banked_points() {
        let state = ProgressState {
            points: 2,
            level: 3,
        };
        assert_eq!(
            state.progress_segments(5),
            vec![true, true, false, false, false]
        );
        assert_eq!(state.tasks_until_next_level(5), 3);
    }

    #[test]
    fn flower_asset_falls_back_outside_known_stages() {
        assert_eq!(flower_stage_asset(1, 5), "stage1_lily");
        assert_eq!(flower_stage_asset(5, 5), "stage5_lily");
        assert_eq!(flower_stage_asset(6, 5), "stage1_lily");
    }
}
