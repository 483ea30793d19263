//! Tracker session facade.
//!
//! # Responsibility
//! - Route adapter intents to the configured policy controller.
//! - Fire level-up notifications and build read-only snapshots.
//!
//! # Invariants
//! - `SubmitDay` is ignored under the auto policy.
//! - A level-up whose settle delay has already elapsed commits before the
//!   next intent is applied, so a later uncheck cannot discard it.
//! - Every intent drives the settle timer again afterwards, so a zero settle
//!   delay commits inside the triggering intent.

use crate::config::{CompletionPolicy, TrackerConfig};
use crate::model::progress::{flower_stage_asset, LevelUpEvent, ProgressState};
use crate::model::task::TaskId;
use crate::service::auto_level::AutoLevelController;
use crate::service::clock::{Clock, SystemClock};
use crate::service::day_cycle::{DayCycleController, SubmitOutcome};
use crate::service::notifier::LevelUpNotifier;
use crate::store::task_store::TaskStore;
use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;

const DAY_LABEL_FORMAT: &str = "%B %-d";

/// User intent forwarded by a presentation adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddTask(String),
    ToggleTask(TaskId),
    RemoveTask(TaskId),
    SubmitDay,
}

impl Intent {
    fn label(&self) -> &'static str {
        match self {
            Self::AddTask(_) => "add_task",
            Self::ToggleTask(_) => "toggle_task",
            Self::RemoveTask(_) => "remove_task",
            Self::SubmitDay => "submit_day",
        }
    }
}

/// What an intent did. Ignored intents report `applied == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntentOutcome {
    pub applied: bool,
    /// Id of the task created by `AddTask`.
    pub task_id: Option<TaskId>,
    pub submit: Option<SubmitOutcome>,
    pub level_up: Option<LevelUpEvent>,
}

impl IntentOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn applied() -> Self {
        Self {
            applied: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: TaskId,
    pub name: String,
    pub completed: bool,
}

/// Read-only state handed to presentation adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerSnapshot {
    pub policy: CompletionPolicy,
    pub tasks: Vec<TaskView>,
    pub points: u32,
    pub level: u32,
    /// Points per level; under auto, the number of tasks to check.
    pub points_per_level: u32,
    pub max_tasks: u32,
    pub can_add_task: bool,
    pub progress_segments: Vec<bool>,
    pub tasks_until_next_level: u32,
    pub flower_asset: String,
    /// Day cursor; `None` under the auto policy.
    pub day: Option<NaiveDate>,
    pub day_label: Option<String>,
    pub settle_pending_ms: Option<u64>,
}

enum PolicyController<C: Clock> {
    Submit(DayCycleController),
    Auto(AutoLevelController<C>),
}

pub struct TrackerSession<C: Clock = SystemClock> {
    config: TrackerConfig,
    controller: PolicyController<C>,
    notifier: Option<Box<dyn LevelUpNotifier>>,
}

impl TrackerSession<SystemClock> {
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TrackerSession<C> {
    pub fn with_clock(config: TrackerConfig, clock: C) -> Self {
        let controller = match config.policy {
            CompletionPolicy::Submit => PolicyController::Submit(DayCycleController::new(
                config.max_tasks,
                config.points_per_level,
                config.epoch,
            )),
            CompletionPolicy::Auto => PolicyController::Auto(AutoLevelController::new(
                config.max_tasks,
                config.settle_delay(),
                clock,
            )),
        };
        info!(
            "event=session_start module=session status=ok policy={:?} max_tasks={} points_per_level={}",
            config.policy, config.max_tasks, config.points_per_level
        );
        Self {
            config,
            controller,
            notifier: None,
        }
    }

    /// Installs the sink that receives level-up events.
    pub fn with_notifier(mut self, notifier: impl LevelUpNotifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn apply(&mut self, intent: Intent) -> IntentOutcome {
        let label = intent.label();
        let matured = self.poll();
        let mut outcome = match (&mut self.controller, intent) {
            (PolicyController::Submit(controller), Intent::AddTask(name)) => {
                added(controller.add_task(&name))
            }
            (PolicyController::Submit(controller), Intent::ToggleTask(id)) => {
                flag(controller.toggle_task(id))
            }
            (PolicyController::Submit(controller), Intent::RemoveTask(id)) => {
                flag(controller.remove_task(id))
            }
            (PolicyController::Submit(controller), Intent::SubmitDay) => {
                let (submit, level_up) = controller.on_submit();
                IntentOutcome {
                    applied: true,
                    task_id: None,
                    submit: Some(submit),
                    level_up,
                }
            }
            (PolicyController::Auto(controller), Intent::AddTask(name)) => {
                added(controller.add_task(&name))
            }
            (PolicyController::Auto(controller), Intent::ToggleTask(id)) => {
                flag(controller.toggle_task(id))
            }
            (PolicyController::Auto(controller), Intent::RemoveTask(id)) => {
                flag(controller.remove_task(id))
            }
            (PolicyController::Auto(_), Intent::SubmitDay) => IntentOutcome::ignored(),
        };

        if !outcome.applied {
            debug!("event=intent module=session status=ignored intent={label}");
        }
        match outcome.level_up {
            Some(event) => self.fire(&event),
            None => outcome.level_up = self.poll().or(matured),
        }
        outcome
    }

    pub fn add_task(&mut self, name: impl Into<String>) -> Option<TaskId> {
        self.apply(Intent::AddTask(name.into())).task_id
    }

    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        self.apply(Intent::ToggleTask(id)).applied
    }

    pub fn remove_task(&mut self, id: TaskId) -> bool {
        self.apply(Intent::RemoveTask(id)).applied
    }

    /// Submits the day. Returns `None` under the auto policy.
    pub fn submit_day(&mut self) -> Option<SubmitOutcome> {
        self.apply(Intent::SubmitDay).submit
    }

    /// Drives the settle timer; adapters call this when the pending delay
    /// reported by `snapshot` has elapsed.
    pub fn poll(&mut self) -> Option<LevelUpEvent> {
        let event = self.poll_settle()?;
        self.fire(&event);
        Some(event)
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        let progress = self.progress();
        let store = self.store();
        // Under auto the bar counts checked tasks toward a full clear.
        let (bar, points_per_level) = match self.config.policy {
            CompletionPolicy::Submit => (progress, self.config.points_per_level),
            CompletionPolicy::Auto => (
                ProgressState {
                    points: store.completed_count(),
                    ..progress
                },
                store.len(),
            ),
        };
        let (day, settle_pending_ms) = match &self.controller {
            PolicyController::Submit(controller) => (Some(controller.day()), None),
            PolicyController::Auto(controller) => (
                None,
                controller
                    .settle_remaining()
                    .map(|left| u64::try_from(left.as_millis()).unwrap_or(u64::MAX)),
            ),
        };
        TrackerSnapshot {
            policy: self.config.policy,
            tasks: store
                .tasks()
                .iter()
                .map(|task| TaskView {
                    id: task.id(),
                    name: task.name().to_string(),
                    completed: task.is_completed(),
                })
                .collect(),
            points: progress.points,
            level: progress.level,
            points_per_level,
            max_tasks: store.max_tasks(),
            can_add_task: !store.is_full(),
            progress_segments: bar.progress_segments(points_per_level),
            tasks_until_next_level: bar.tasks_until_next_level(points_per_level),
            flower_asset: flower_stage_asset(progress.level, self.config.flower_stages),
            day,
            day_label: day.map(|day| day.format(DAY_LABEL_FORMAT).to_string()),
            settle_pending_ms,
        }
    }

    pub fn store(&self) -> &TaskStore {
        match &self.controller {
            PolicyController::Submit(controller) => controller.store(),
            PolicyController::Auto(controller) => controller.store(),
        }
    }

    pub fn progress(&self) -> ProgressState {
        match &self.controller {
            PolicyController::Submit(controller) => controller.progress(),
            PolicyController::Auto(controller) => controller.progress(),
        }
    }

    fn poll_settle(&mut self) -> Option<LevelUpEvent> {
        match &mut self.controller {
            PolicyController::Submit(_) => None,
            PolicyController::Auto(controller) => controller.poll(),
        }
    }

    fn fire(&mut self, event: &LevelUpEvent) {
        info!(
            "event=level_up module=session status=ok from={} to={} gained={}",
            event.previous_level, event.new_level, event.levels_gained
        );
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.notify(event);
        }
    }
}

fn added(task_id: Option<TaskId>) -> IntentOutcome {
    IntentOutcome {
        applied: task_id.is_some(),
        task_id,
        ..IntentOutcome::default()
    }
}

fn flag(applied: bool) -> IntentOutcome {
    if applied {
        IntentOutcome::applied()
    } else {
        IntentOutcome::ignored()
    }
}

#[cfg(test)]
mod tests {
    use super::{Intent, TrackerSession};
    use crate::config::{CompletionPolicy, TrackerConfig};

    #[test]
    fn submit_day_is_ignored_under_auto_policy() {
        let mut session = TrackerSession::new(TrackerConfig::for_policy(CompletionPolicy::Auto));
        let outcome = session.apply(Intent::SubmitDay);
        assert!(!outcome.applied);
        assert!(outcome.submit.is_none());
    }

    #[test]
    fn auto_snapshot_measures_checked_tasks() {
        let mut session = TrackerSession::new(TrackerConfig::for_policy(CompletionPolicy::Auto));
        let first = session.add_task("floss").expect("task added");
        session.add_task("stretch").expect("task added");
        session.add_task("read").expect("task added");
        session.toggle_task(first);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.points_per_level, 3);
        assert_eq!(snapshot.progress_segments, vec![true, false, false]);
        assert_eq!(snapshot.tasks_until_next_level, 2);
    }

    #[test]
    fn snapshot_formats_day_label() {
        let session = TrackerSession::new(TrackerConfig::default());
        let snapshot = session.snapshot();
        assert_eq!(snapshot.day_label.as_deref(), Some("January 1"));
        assert_eq!(snapshot.flower_asset, "stage1_lily");
        assert_eq!(snapshot.tasks_until_next_level, 5);
        assert!(snapshot.can_add_task);
    }
}
