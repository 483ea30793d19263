//! Bounded, insertion-ordered task store.

use crate::model::task::{Task, TaskId};
use log::debug;

/// Ordered collection of tasks with a fixed capacity.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    max_tasks: u32,
}

impl TaskStore {
    pub fn new(max_tasks: u32) -> Self {
        Self {
            tasks: Vec::new(),
            max_tasks,
        }
    }

    /// Appends an unchecked task.
    ///
    /// Returns `false` without touching the store when `name` is blank or the
    /// store is full.
    pub fn add(&mut self, name: &str) -> bool {
        self.add_task(name).is_some()
    }

    /// Same as `add`, returning the new task id on success.
    pub fn add_task(&mut self, name: &str) -> Option<TaskId> {
        if self.is_full() {
            debug!(
                "event=task_add module=store status=ignored reason=full max_tasks={}",
                self.max_tasks
            );
            return None;
        }
        let task = match Task::new(name) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_add module=store status=ignored reason=\"{err}\"");
                return None;
            }
        };
        let id = task.id();
        self.tasks.push(task);
        debug!(
            "event=task_add module=store status=ok task_id={id} size={}",
            self.len()
        );
        Some(id)
    }

    /// Flips the completion flag. Returns `false` when `id` is unknown.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|task| task.id() == id) {
            Some(task) => {
                task.toggle();
                true
            }
            None => false,
        }
    }

    /// Removes a task. Returns `false` when `id` is unknown.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        self.tasks.len() != before
    }

    pub fn completed_count(&self) -> u32 {
        self.count_where(Task::is_completed)
    }

    /// Unchecks every task.
    pub fn reset_all(&mut self) {
        self.tasks.iter_mut().for_each(Task::uncheck);
    }

    /// True when the store is non-empty and every task is checked.
    pub fn all_completed(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(Task::is_completed)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> u32 {
        self.count_where(|_| true)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max_tasks
    }

    pub fn max_tasks(&self) -> u32 {
        self.max_tasks
    }

    // Size is bounded by the u32 capacity, so counts never need narrowing.
    fn count_where(&self, predicate: impl Fn(&Task) -> bool) -> u32 {
        self.tasks.iter().filter(|task| predicate(task)).map(|_| 1).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use uuid::Uuid;

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = TaskStore::new(3);
        assert!(store.add("stretch"));
        assert!(store.add("journal"));
        let names: Vec<&str> = store.tasks().iter().map(|task| task.name()).collect();
        assert_eq!(names, vec!["stretch", "journal"]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = TaskStore::new(3);
        store.add("stretch");
        assert!(!store.toggle(Uuid::new_v4()));
        assert!(!store.remove(Uuid::new_v4()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn counts_share_the_capacity_width() {
        let config = crate::config::TrackerConfig::default();
        let mut store = TaskStore::new(config.max_tasks);
        while store.add("habit") {}
        assert_eq!(store.len(), config.max_tasks);
        for id in store.tasks().iter().map(|task| task.id()).collect::<Vec<_>>() {
            store.toggle(id);
        }
        assert_eq!(store.completed_count(), store.len());
    }

    #[test]
    fn all_completed_requires_a_non_empty_store() {
        let mut store = TaskStore::new(3);
        assert!(!store.all_completed());
        let id = store.add_task("stretch").expect("task added");
        store.toggle(id);
        assert!(store.all_completed());
    }
}
