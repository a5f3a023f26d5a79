//! Push-button press detection.

use embassy_time::{Duration, Instant};

use crate::debounce::DebounceWindow;

/// Index of a button within an [`InputContext`](crate::InputContext).
pub type ButtonId = usize;

/// Signal edge reported by the signal source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low → high (release, with the usual pull-up wiring).
    Rising,
    /// High → low (press, with the usual pull-up wiring).
    Falling,
}

/// A debounced button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent {
    /// The button that was pressed.
    pub button: ButtonId,
}

/// Turns falling edges of one switch into [`PressEvent`]s.
///
/// Rising edges are ignored. A falling edge produces a press only when the
/// debounce window has elapsed since the last *emitted* press.
///
/// # Examples
///
/// ```
/// use embassy_time::{Duration, Instant};
/// use rotary_input::{ButtonDebouncer, Edge};
///
/// let mut button = ButtonDebouncer::new(0, Duration::from_millis(200));
/// assert!(button.on_edge(Edge::Falling, Instant::from_millis(0)).is_some());
/// assert!(button.on_edge(Edge::Falling, Instant::from_millis(50)).is_none());
/// assert!(button.on_edge(Edge::Falling, Instant::from_millis(250)).is_some());
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDebouncer {
    button: ButtonId,
    window: DebounceWindow,
}

impl ButtonDebouncer {
    /// Create a debouncer for `button` with the given window.
    pub const fn new(button: ButtonId, window: Duration) -> Self {
        Self {
            button,
            window: DebounceWindow::new(window),
        }
    }

    /// Handle one edge observed at `now`.
    pub fn on_edge(&mut self, edge: Edge, now: Instant) -> Option<PressEvent> {
        match edge {
            Edge::Rising => None,
            Edge::Falling => self.window.accept(now).then_some(PressEvent {
                button: self.button,
            }),
        }
    }

    /// The button this debouncer reports for.
    pub fn button(&self) -> ButtonId {
        self.button
    }

    /// Timestamp of the last emitted press.
    pub fn last_press(&self) -> Option<Instant> {
        self.window.last_accepted()
    }
}
