//! Auto-policy controller.
//!
//! # Responsibility
//! - Own the task store and level for one session.
//! - Level up once every task is checked, after a short settle delay.
//!
//! # Invariants
//! - Only a rising edge of "all tasks checked" schedules a level-up.
//! - A falling edge before the deadline drops the pending level-up.
//! - Each commit gains exactly one level and unchecks every task.
//! - An empty store never levels up.

use crate::model::progress::{LevelUpEvent, ProgressState};
use crate::model::task::TaskId;
use crate::progress::edge::{Edge, FullClearDetector};
use crate::service::clock::Clock;
use crate::store::task_store::TaskStore;
use log::{debug, info};
use std::time::{Duration, Instant};

pub struct AutoLevelController<C: Clock> {
    store: TaskStore,
    progress: ProgressState,
    detector: FullClearDetector,
    settle_delay: Duration,
    pending_deadline: Option<Instant>,
    clock: C,
}

impl<C: Clock> AutoLevelController<C> {
    pub fn new(max_tasks: u32, settle_delay: Duration, clock: C) -> Self {
        Self {
            store: TaskStore::new(max_tasks),
            progress: ProgressState::default(),
            detector: FullClearDetector::new(),
            settle_delay,
            pending_deadline: None,
            clock,
        }
    }

    pub fn add_task(&mut self, name: &str) -> Option<TaskId> {
        let id = self.store.add_task(name)?;
        self.observe_store();
        Some(id)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        let applied = self.store.toggle(id);
        if applied {
            self.observe_store();
        }
        applied
    }

    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let applied = self.store.remove(id);
        if applied {
            self.observe_store();
        }
        applied
    }

    /// Commits a pending level-up once its settle delay has elapsed.
    ///
    /// The condition is re-checked at commit time; nothing happens when no
    /// deadline is pending or it has not been reached yet.
    pub fn poll(&mut self) -> Option<LevelUpEvent> {
        let deadline = self.pending_deadline?;
        if self.clock.now() < deadline {
            return None;
        }
        self.pending_deadline = None;
        if !self.store.all_completed() {
            self.detector.rearm();
            return None;
        }

        let previous_level = self.progress.level;
        self.progress.level = previous_level.saturating_add(1);
        self.progress.points = 0;
        self.store.reset_all();
        self.detector.rearm();

        info!(
            "event=auto_level_up module=auto_level status=ok tasks={} level={}",
            self.store.len(),
            self.progress.level
        );
        Some(LevelUpEvent {
            previous_level,
            new_level: self.progress.level,
            levels_gained: 1,
        })
    }

    /// Time left before the pending level-up may commit.
    pub fn settle_remaining(&self) -> Option<Duration> {
        self.pending_deadline
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()))
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    fn observe_store(&mut self) {
        match self.detector.observe(self.store.all_completed()) {
            Edge::Rising => {
                self.pending_deadline = Some(self.clock.now() + self.settle_delay);
                debug!(
                    "event=settle_scheduled module=auto_level status=ok delay_ms={}",
                    self.settle_delay.as_millis()
                );
            }
            Edge::Falling => {
                if self.pending_deadline.take().is_some() {
                    debug!("event=settle_cancelled module=auto_level status=ok");
                }
            }
            Edge::Unchanged => {}
        }
    }
}
