//! Board-level configuration for the rotary encoder panel.

use embassy_time::Duration;
use rotary_input::InputConfig;

/// Number of rotary encoders wired to the board.
pub const ENCODER_COUNT: usize = 2;

/// Number of push switches (one per encoder shaft).
pub const BUTTON_COUNT: usize = 2;

/// Depth of the queue between edge handlers and the report task.
pub const EVENT_QUEUE_DEPTH: usize = 16;

/// Interval of the idle status log.
pub const STATUS_INTERVAL: Duration = Duration::from_secs(10);

/// Decoding parameters for every encoder and switch on the panel.
///
/// The library defaults fit these knobs: 0..=100 in single steps starting
/// mid-range, 2 ms channel debounce and 200 ms for the shaft switches.
pub fn input_config() -> InputConfig {
    InputConfig::default()
}
