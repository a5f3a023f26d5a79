//! Error types for input configuration.

use core::fmt;

/// Errors detected when an [`InputConfig`](crate::InputConfig) is validated.
///
/// These are the only failures the crate reports. Runtime input is always
/// classifiable; bounced or illegal transitions simply decode to no motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_value` is greater than `max_value`.
    InvalidRange { min: i32, max: i32 },

    /// Step size must be strictly positive.
    InvalidStep(i32),

    /// Initial value lies outside `[min_value, max_value]`.
    InitialValueOutOfRange(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidRange { min, max } => {
                write!(f, "Invalid value range: min {} > max {}", min, max)
            }
            ConfigError::InvalidStep(step) => {
                write!(f, "Invalid step {} (must be positive)", step)
            }
            ConfigError::InitialValueOutOfRange(value) => {
                write!(f, "Initial value {} outside value range", value)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::InvalidRange { min, max } => {
                defmt::write!(f, "Invalid value range: min {} > max {}", min, max)
            }
            ConfigError::InvalidStep(step) => {
                defmt::write!(f, "Invalid step {} (must be positive)", step)
            }
            ConfigError::InitialValueOutOfRange(value) => {
                defmt::write!(f, "Initial value {} outside value range", value)
            }
        }
    }
}
