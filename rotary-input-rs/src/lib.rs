//! Quadrature decoding and button debouncing for GPIO-driven rotary encoders.
//!
//! This crate turns raw edge notifications from mechanical rotary encoders
//! and push-buttons into a clamped integer value per encoder and discrete
//! press events per button. It has no knowledge of pins or boards; a
//! firmware shell watches the GPIOs and forwards each edge to an
//! [`InputContext`].
//!
//! # Architecture
//!
//! ```text
//! CLK/DT edge ──► QuadratureDecoder ──► EncoderValue ──┐
//!                                                      ├──► InputObserver
//! switch edge ──► ButtonDebouncer ─────────────────────┘
//! ```
//!
//! - **[`QuadratureDecoder`]** — per-encoder state machine over the 2-bit
//!   Gray-code cycle. Illegal transitions decode to no motion.
//! - **[`EncoderValue`]** — bounded running value, clamped after every step.
//! - **[`ButtonDebouncer`]** — falling-edge press detection with a minimum
//!   interval between accepted presses.
//! - **[`InputContext`]** — owns one of each per physical input, each behind
//!   its own mutex, and reports changes to an [`InputObserver`].
//!
//! # Quick Start
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use embassy_sync::channel::Channel;
//! use rotary_input::{InputConfig, InputContext, InputEvent};
//!
//! let events: Channel<CriticalSectionRawMutex, InputEvent, 8> = Channel::new();
//! let context: InputContext<CriticalSectionRawMutex, _, 1, 0> =
//!     InputContext::new(InputConfig::default(), &events).unwrap();
//!
//! // Baseline, then one clockwise step (00 -> 01).
//! context.notify_channel_changed(0, false, false);
//! context.notify_channel_changed(0, false, true);
//!
//! assert_eq!(context.value(0), Some(51));
//! assert_eq!(
//!     events.try_receive().ok(),
//!     Some(InputEvent::ValueChanged { encoder: 0, value: 51 })
//! );
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — derive [`defmt::Format`] on public types and log unknown
//!   ids, dropped events and accepted inputs.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod button;
pub mod config;
pub mod context;
pub mod debounce;
pub mod error;
pub mod quadrature;
pub mod value;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use button::{ButtonDebouncer, ButtonId, Edge, PressEvent};
pub use config::InputConfig;
pub use context::{EncoderId, EncoderPin, InputContext, InputEvent, InputObserver};
pub use debounce::DebounceWindow;
pub use error::ConfigError;
pub use quadrature::{ChannelState, Direction, QuadratureDecoder};
pub use value::{EncoderValue, ValueUpdate};
