//! Level-up notification sinks.

use crate::model::progress::LevelUpEvent;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Receives one call per committed level-up.
pub trait LevelUpNotifier: Send {
    fn notify(&mut self, event: &LevelUpEvent);
}

impl<F> LevelUpNotifier for F
where
    F: FnMut(&LevelUpEvent) + Send,
{
    fn notify(&mut self, event: &LevelUpEvent) {
        self(event)
    }
}

/// Shared FIFO of level-up events for adapters that drain on their own
/// schedule (e.g. the Flutter bridge).
#[derive(Debug, Clone, Default)]
pub struct LevelUpQueue {
    events: Arc<Mutex<VecDeque<LevelUpEvent>>>,
}

impl LevelUpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued event, oldest first.
    pub fn drain(&self) -> Vec<LevelUpEvent> {
        self.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LevelUpEvent>> {
        // A panicking notifier must not wedge later drains.
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LevelUpNotifier for LevelUpQueue {
    fn notify(&mut self, event: &LevelUpEvent) {
        self.lock().push_back(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::{LevelUpNotifier, LevelUpQueue};
    use crate::model::progress::LevelUpEvent;

    #[test]
    fn queue_drains_in_arrival_order() {
        let queue = LevelUpQueue::new();
        let mut sink = queue.clone();
        for level in 2..=3 {
            sink.notify(&LevelUpEvent {
                previous_level: level - 1,
                new_level: level,
                levels_gained: 1,
            });
        }
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].new_level, 2);
        assert!(queue.is_empty());
    }
}
