//! Task domain model.
//!
//! # Responsibility
//! - Define the checkable task record owned by `TaskStore`.
//! - Validate display names before a task can exist.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `name` is trimmed and never blank.
//! - `completed` changes only through crate-internal store operations.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task entry.
pub type TaskId = Uuid;

/// Validation errors for task construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Name is empty or whitespace-only.
    BlankName,
    /// Caller-provided id is nil.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "task name cannot be blank"),
            Self::NilId => write!(f, "task id cannot be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// One checkable to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    name: String,
    completed: bool,
}

impl Task {
    /// Creates an unchecked task with a generated id.
    pub fn new(name: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an unchecked task with a caller-provided id.
    pub fn with_id(id: TaskId, name: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(TaskValidationError::BlankName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            completed: false,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub(crate) fn uncheck(&mut self) {
        self.completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValidationError};
    use uuid::Uuid;

    #[test]
    fn new_trims_name_and_starts_unchecked() {
        let task = Task::new("  water plants ").expect("valid name");
        assert_eq!(task.name(), "water plants");
        assert!(!task.is_completed());
        assert!(!task.id().is_nil());
    }

    #[test]
    fn blank_and_nil_inputs_are_rejected() {
        assert_eq!(Task::new("   ").unwrap_err(), TaskValidationError::BlankName);
        assert_eq!(
            Task::with_id(Uuid::nil(), "read").unwrap_err(),
            TaskValidationError::NilId
        );
    }
}
