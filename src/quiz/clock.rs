//! Single-fire question countdown
//!
//! The clock never reads wall time. The host's event loop advances it with
//! elapsed durations, and the pending timeout's payload is handed back
//! exactly once, on the step that reaches the deadline.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<E> {
    duration: Duration,
    elapsed: Duration,
    on_timeout: E,
}

/// Countdown holding at most one pending timeout
#[derive(Debug, Clone)]
pub struct SessionClock<E> {
    pending: Option<Pending<E>>,
    /// Progress of the most recent countdown, kept after it fires or is cancelled
    last_progress: f32,
}

impl<E> Default for SessionClock<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SessionClock<E> {
    pub fn new() -> Self {
        Self {
            pending: None,
            last_progress: 0.0,
        }
    }

    /// Schedule `on_timeout` after `duration`, replacing any pending timeout
    pub fn start(&mut self, duration: Duration, on_timeout: E) {
        self.cancel();
        self.last_progress = 0.0;
        self.pending = Some(Pending {
            duration,
            elapsed: Duration::ZERO,
            on_timeout,
        });
    }

    /// Drop the pending timeout, if any. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.last_progress = pending.progress();
        }
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Elapsed fraction of the current countdown in [0, 1]
    pub fn progress(&self) -> f32 {
        self.pending
            .as_ref()
            .map(Pending::progress)
            .unwrap_or(self.last_progress)
    }

    /// Time left before the pending timeout fires
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.duration.saturating_sub(p.elapsed))
    }

    /// Move time forward; returns the payload if the deadline was reached
    pub fn advance(&mut self, dt: Duration) -> Option<E> {
        let pending = self.pending.as_mut()?;
        pending.elapsed = pending.elapsed.saturating_add(dt);
        if pending.elapsed < pending.duration {
            return None;
        }
        let fired = self.pending.take()?;
        self.last_progress = 1.0;
        Some(fired.on_timeout)
    }
}

impl<E> Pending<E> {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_fires_once_at_deadline() {
        let mut clock = SessionClock::new();
        clock.start(3 * SEC, "q0");

        assert_eq!(clock.advance(SEC), None);
        assert_eq!(clock.advance(SEC), None);
        assert!(clock.is_active());
        assert_eq!(clock.advance(SEC), Some("q0"));
        assert!(!clock.is_active());
        assert_eq!(clock.advance(10 * SEC), None);
    }

    #[test]
    fn test_large_step_fires_once() {
        let mut clock = SessionClock::new();
        clock.start(SEC, 7u32);
        assert_eq!(clock.advance(60 * SEC), Some(7));
        assert_eq!(clock.advance(60 * SEC), None);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut clock = SessionClock::new();
        clock.start(2 * SEC, ());
        clock.advance(SEC);
        clock.cancel();
        assert_eq!(clock.advance(5 * SEC), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut clock: SessionClock<()> = SessionClock::new();
        clock.cancel();
        clock.start(SEC, ());
        clock.cancel();
        clock.cancel();
        assert!(!clock.is_active());

        clock.start(SEC, ());
        assert_eq!(clock.advance(SEC), Some(()));
        clock.cancel();
        assert!(!clock.is_active());
    }

    #[test]
    fn test_restart_replaces_pending() {
        let mut clock = SessionClock::new();
        clock.start(2 * SEC, 1);
        clock.advance(SEC);
        clock.start(2 * SEC, 2);
        // The first timeout would have fired here
        assert_eq!(clock.advance(SEC), None);
        assert_eq!(clock.advance(SEC), Some(2));
    }

    #[test]
    fn test_progress() {
        let mut clock = SessionClock::new();
        assert_eq!(clock.progress(), 0.0);

        clock.start(4 * SEC, ());
        clock.advance(SEC);
        assert!((clock.progress() - 0.25).abs() < 1e-6);
        assert_eq!(clock.remaining(), Some(3 * SEC));

        // Frozen where it stopped
        clock.cancel();
        assert!((clock.progress() - 0.25).abs() < 1e-6);
        assert_eq!(clock.remaining(), None);

        clock.start(SEC, ());
        clock.advance(2 * SEC);
        assert_eq!(clock.progress(), 1.0);
    }

    #[test]
    fn test_zero_duration_fires_on_next_step() {
        let mut clock = SessionClock::new();
        clock.start(Duration::ZERO, "now");
        assert_eq!(clock.progress(), 1.0);
        assert_eq!(clock.advance(Duration::ZERO), Some("now"));
    }
}
