//! Point banking for the submit policy.

use crate::model::progress::ProgressState;

/// Result of banking one day's completed tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitResult {
    pub new_points: u32,
    pub new_level: u32,
    pub levels_gained: u32,
}

impl SubmitResult {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }

    pub fn progress(&self) -> ProgressState {
        ProgressState {
            points: self.new_points,
            level: self.new_level,
        }
    }
}

/// Adds `completed_count` to the banked points and folds every full
/// `points_per_level` into the level.
///
/// `points_per_level` must be non-zero; `TrackerConfig::validate` enforces it.
pub fn submit(
    completed_count: u32,
    current_points: u32,
    current_level: u32,
    points_per_level: u32,
) -> SubmitResult {
    let per_level = points_per_level.max(1);
    let total = current_points.saturating_add(completed_count);
    let levels_gained = total / per_level;
    SubmitResult {
        new_points: total % per_level,
        new_level: current_level.saturating_add(levels_gained),
        levels_gained,
    }
}

#[cfg(test)]
mod tests {
    use super::submit;

    #[test]
    fn carries_remainder_into_next_level() {
        let result = submit(3, 4, 1, 5);
        assert_eq!(result.levels_gained, 1);
        assert_eq!(result.new_level, 2);
        assert_eq!(result.new_points, 2);
        assert!(result.leveled_up());
    }

    #[test]
    fn empty_day_changes_nothing() {
        let result = submit(0, 0, 1, 5);
        assert_eq!(result.levels_gained, 0);
        assert_eq!(result.new_level, 1);
        assert_eq!(result.new_points, 0);
        assert!(!result.leveled_up());
    }

    #[test]
    fn large_banks_gain_several_levels_at_once() {
        let result = submit(6, 4, 2, 5);
        assert_eq!(result.levels_gained, 2);
        assert_eq!(result.new_level, 4);
        assert_eq!(result.new_points, 0);
    }

    #[test]
    fn points_stay_below_threshold_for_every_input() {
        for per_level in 1..=6 {
            for points in 0..per_level {
                for completed in 0..=6 {
                    let result = submit(completed, points, 1, per_level);
                    assert!(result.new_points < per_level);
                    assert_eq!(
                        result.levels_gained * per_level + result.new_points,
                        points + completed
                    );
                }
            }
        }
    }
}
