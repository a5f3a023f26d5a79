//! Bounded running value driven by decoded quadrature steps.

use crate::config::InputConfig;
use crate::error::ConfigError;
use crate::quadrature::Direction;

/// Result of applying one decoded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueUpdate {
    /// Value after the step, always within the configured range.
    pub value: i32,
    /// `true` only if `value` differs from the value before the step.
    ///
    /// Motion absorbed entirely by clamping at a boundary reports `false`.
    pub changed: bool,
}

/// Bounded running value of one encoder.
///
/// The value is clamped to `[min_value, max_value]` after every step, so it
/// can never be observed out of range. The step size is fixed and validated
/// at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderValue {
    value: i32,
    min_value: i32,
    max_value: i32,
    step: i32,
}

impl EncoderValue {
    /// Create a value starting at `initial` inside `[min_value, max_value]`
    /// that moves by `step` per decoded step.
    ///
    /// Returns [`ConfigError::InvalidRange`] if `min_value > max_value`,
    /// [`ConfigError::InvalidStep`] if `step <= 0` and
    /// [`ConfigError::InitialValueOutOfRange`] if `initial` is outside the
    /// range.
    pub fn new(
        initial: i32,
        min_value: i32,
        max_value: i32,
        step: i32,
    ) -> Result<Self, ConfigError> {
        if min_value > max_value {
            return Err(ConfigError::InvalidRange {
                min: min_value,
                max: max_value,
            });
        }
        if step <= 0 {
            return Err(ConfigError::InvalidStep(step));
        }
        if !(min_value..=max_value).contains(&initial) {
            return Err(ConfigError::InitialValueOutOfRange(initial));
        }
        Ok(Self {
            value: initial,
            min_value,
            max_value,
            step,
        })
    }

    /// Create a value from the range, step and initial value of an
    /// [`InputConfig`].
    pub fn from_config(config: &InputConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.initial_value,
            config.min_value,
            config.max_value,
            config.step,
        )
    }

    /// Move the value by one step in `direction`, clamping to the range.
    ///
    /// [`Direction::None`] leaves the value untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotary_input::{Direction, EncoderValue};
    ///
    /// let mut v = EncoderValue::new(0, 0, 100, 1).unwrap();
    /// assert!(!v.apply(Direction::CounterClockwise).changed);
    /// assert_eq!(v.apply(Direction::Clockwise).value, 1);
    /// ```
    pub fn apply(&mut self, direction: Direction) -> ValueUpdate {
        let previous = self.value;
        let delta = self.step.saturating_mul(direction.sign());
        self.value = previous
            .saturating_add(delta)
            .clamp(self.min_value, self.max_value);
        ValueUpdate {
            value: self.value,
            changed: self.value != previous,
        }
    }

    /// Current value.
    pub fn get(&self) -> i32 {
        self.value
    }

    /// Lower bound (inclusive).
    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    /// Upper bound (inclusive).
    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    /// Value change per step.
    pub fn step(&self) -> i32 {
        self.step
    }
}
