//! Submit-policy controller.
//!
//! # Responsibility
//! - Own the task store, progress state and day cursor for one session.
//! - Apply one "submit day" transition as a single step.
//!
//! # Invariants
//! - A submit banks points, levels up, unchecks every task and advances the
//!   day by exactly one, with no partially applied state observable.
//! - At most one level-up event per submit, whatever the levels gained.

use crate::model::progress::{LevelUpEvent, ProgressState};
use crate::model::task::TaskId;
use crate::progress::engine::submit;
use crate::store::task_store::TaskStore;
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

/// Summary of one applied submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub completed_count: u32,
    pub levels_gained: u32,
    pub points: u32,
    pub level: u32,
    /// Day cursor after the advance.
    pub day: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct DayCycleController {
    store: TaskStore,
    progress: ProgressState,
    day: NaiveDate,
    points_per_level: u32,
}

impl DayCycleController {
    pub fn new(max_tasks: u32, points_per_level: u32, epoch: NaiveDate) -> Self {
        Self {
            store: TaskStore::new(max_tasks),
            progress: ProgressState::default(),
            day: epoch,
            points_per_level,
        }
    }

    pub fn add_task(&mut self, name: &str) -> Option<TaskId> {
        self.store.add_task(name)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        self.store.toggle(id)
    }

    pub fn remove_task(&mut self, id: TaskId) -> bool {
        self.store.remove(id)
    }

    /// Banks today's checked tasks and moves to the next day.
    pub fn on_submit(&mut self) -> (SubmitOutcome, Option<LevelUpEvent>) {
        let completed_count = self.store.completed_count();
        let previous_level = self.progress.level;
        let result = submit(
            completed_count,
            self.progress.points,
            previous_level,
            self.points_per_level,
        );

        let next_day = match self.day.succ_opt() {
            Some(day) => day,
            None => {
                warn!("event=day_advance module=day_cycle status=saturated day={}", self.day);
                self.day
            }
        };

        self.progress = result.progress();
        self.store.reset_all();
        self.day = next_day;

        info!(
            "event=day_submit module=day_cycle status=ok completed={} points={} level={} levels_gained={} day={}",
            completed_count, result.new_points, result.new_level, result.levels_gained, self.day
        );

        let level_up = result.leveled_up().then_some(LevelUpEvent {
            previous_level,
            new_level: result.new_level,
            levels_gained: result.levels_gained,
        });
        let outcome = SubmitOutcome {
            completed_count,
            levels_gained: result.levels_gained,
            points: result.new_points,
            level: result.new_level,
            day: self.day,
        };
        (outcome, level_up)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

#[cfg(test)]
mod tests {
    use super::DayCycleController;
    use chrono::NaiveDate;

    fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date")
    }

    #[test]
    fn submit_resets_checks_and_advances_one_day() {
        let mut controller = DayCycleController::new(6, 5, epoch());
        let id = controller.add_task("walk").expect("task added");
        controller.toggle_task(id);

        let (outcome, level_up) = controller.on_submit();

        assert_eq!(outcome.completed_count, 1);
        assert_eq!(controller.progress().points, 1);
        assert_eq!(controller.store().completed_count(), 0);
        assert_eq!(controller.day(), NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert!(level_up.is_none());
    }

    #[test]
    fn day_cursor_saturates_at_max_date() {
        let mut controller = DayCycleController::new(6, 5, NaiveDate::MAX);
        let (outcome, _) = controller.on_submit();
        assert_eq!(outcome.day, NaiveDate::MAX);
    }
}
