//! Minimum-interval gate shared by button and channel debouncing.

use embassy_time::{Duration, Instant};

/// Accepts an event only if at least `window` has elapsed since the last
/// *accepted* event.
///
/// Rejected events do not move the reference point, so a burst of bounces
/// cannot keep pushing the window forward and starve the next real event.
/// A zero window accepts everything.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceWindow {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl DebounceWindow {
    /// Create a gate that has not accepted anything yet.
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Decide whether an event at `now` passes the gate.
    ///
    /// A timestamp earlier than the last accepted one (out-of-order
    /// delivery) is treated as inside the window.
    pub fn accept(&mut self, now: Instant) -> bool {
        let open = match self.last_accepted {
            None => true,
            Some(last) => now
                .checked_duration_since(last)
                .is_some_and(|elapsed| elapsed >= self.window),
        };
        if open {
            self.last_accepted = Some(now);
        }
        open
    }

    /// The configured minimum interval.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Timestamp of the last accepted event.
    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn first_event_always_passes() {
        let mut gate = DebounceWindow::new(Duration::from_millis(200));
        assert_eq!(gate.window(), Duration::from_millis(200));
        assert_eq!(gate.last_accepted(), None);
        assert!(gate.accept(at(0)));
        assert_eq!(gate.last_accepted(), Some(at(0)));
    }

    #[test]
    fn boundary_is_inclusive() {
        let mut gate = DebounceWindow::new(Duration::from_millis(200));
        assert!(gate.accept(at(1000)));
        assert!(!gate.accept(at(1199)));
        assert!(gate.accept(at(1200)));
    }

    #[test]
    fn rejected_events_do_not_extend_window() {
        let mut gate = DebounceWindow::new(Duration::from_millis(200));
        assert!(gate.accept(at(0)));
        // Bounces every 50 ms would starve the gate if they reset the clock.
        for t in [50, 100, 150] {
            assert!(!gate.accept(at(t)));
        }
        assert!(gate.accept(at(200)));
    }

    #[test]
    fn out_of_order_timestamp_is_rejected() {
        let mut gate = DebounceWindow::new(Duration::from_millis(2));
        assert!(gate.accept(at(500)));
        assert!(!gate.accept(at(400)));
        assert_eq!(gate.last_accepted(), Some(at(500)));
    }

    #[test]
    fn zero_window_accepts_everything() {
        let mut gate = DebounceWindow::new(Duration::from_ticks(0));
        assert!(gate.accept(at(10)));
        assert!(gate.accept(at(10)));
        assert!(gate.accept(at(11)));
    }
}
