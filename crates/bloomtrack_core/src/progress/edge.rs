//! Rising-edge detection for the auto policy.

/// Transition reported by `FullClearDetector::observe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Condition went from false to true.
    Rising,
    /// Condition went from true to false.
    Falling,
    Unchanged,
}

/// Remembers the previous "all completed" observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullClearDetector {
    was_full: bool,
}

impl FullClearDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `is_full` and reports how it changed since the last call.
    pub fn observe(&mut self, is_full: bool) -> Edge {
        let edge = match (self.was_full, is_full) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::Unchanged,
        };
        self.was_full = is_full;
        edge
    }

    /// Forgets the last observation; used after the store is reset.
    pub fn rearm(&mut self) {
        self.was_full = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, FullClearDetector};

    #[test]
    fn level_signal_fires_once() {
        let mut detector = FullClearDetector::new();
        assert_eq!(detector.observe(true), Edge::Rising);
        assert_eq!(detector.observe(true), Edge::Unchanged);
        assert_eq!(detector.observe(false), Edge::Falling);
        assert_eq!(detector.observe(true), Edge::Rising);
    }

    #[test]
    fn rearm_allows_next_rising_edge() {
        let mut detector = FullClearDetector::new();
        detector.observe(true);
        detector.rearm();
        assert_eq!(detector.observe(true), Edge::Rising);
    }
}
