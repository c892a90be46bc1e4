//! Adaptive difficulty
//!
//! Unbounded on purpose: the answer generator clamps into the configured
//! dot count range, so the tracker never needs to know about it.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DIFFICULTY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTracker {
    initial: i32,
    value: i32,
}

impl Default for DifficultyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl DifficultyTracker {
    pub fn new(initial: i32) -> Self {
        Self {
            initial,
            value: initial,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Step up after a correct answer
    pub fn increase(&mut self) -> i32 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    /// Step down after a wrong answer or timeout
    pub fn decrease(&mut self) -> i32 {
        self.value = self.value.saturating_sub(1);
        self.value
    }

    pub fn reset(&mut self) {
        self.value = self.initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_default() {
        assert_eq!(DifficultyTracker::default().value(), 8);
    }

    #[test]
    fn test_steps_are_unbounded() {
        let mut tracker = DifficultyTracker::new(1);
        for _ in 0..5 {
            tracker.decrease();
        }
        assert_eq!(tracker.value(), -4);

        for _ in 0..100 {
            tracker.increase();
        }
        assert_eq!(tracker.value(), 96);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut tracker = DifficultyTracker::new(3);
        tracker.increase();
        tracker.increase();
        tracker.reset();
        assert_eq!(tracker.value(), 3);
    }
}
