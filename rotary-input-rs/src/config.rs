//! Construction-time configuration.

use embassy_time::Duration;

use crate::error::ConfigError;

/// Value range, step size and debounce windows shared by all inputs of an
/// [`InputContext`](crate::InputContext).
///
/// [`InputConfig::default()`] reproduces the classic knob setup: values
/// `0..=100` starting at 50, one unit per detent, 2 ms channel debounce and
/// 200 ms button debounce. Tune individual fields with struct-update syntax:
///
/// ```
/// use embassy_time::Duration;
/// use rotary_input::InputConfig;
///
/// let config = InputConfig {
///     max_value: 127,
///     button_debounce: Duration::from_millis(50),
///     ..InputConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Lowest encoder value (inclusive). Default: 0.
    pub min_value: i32,
    /// Highest encoder value (inclusive). Default: 100.
    pub max_value: i32,
    /// Value change per detent step. Must be positive. Default: 1.
    pub step: i32,
    /// Value every encoder starts at. Default: 50.
    pub initial_value: i32,
    /// Minimum interval between accepted edges on one encoder channel.
    /// Default: 2 ms.
    pub channel_debounce: Duration,
    /// Minimum interval between accepted presses of one button.
    /// Default: 200 ms.
    pub button_debounce: Duration,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_value: 0,
            max_value: 100,
            step: 1,
            initial_value: 50,
            channel_debounce: Duration::from_millis(2),
            button_debounce: Duration::from_millis(200),
        }
    }
}

impl InputConfig {
    /// Check the range, step and initial value.
    ///
    /// Debounce windows are not checked; a zero window disables filtering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_value > self.max_value {
            return Err(ConfigError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.step <= 0 {
            return Err(ConfigError::InvalidStep(self.step));
        }
        if !(self.min_value..=self.max_value).contains(&self.initial_value) {
            return Err(ConfigError::InitialValueOutOfRange(self.initial_value));
        }
        Ok(())
    }
}
