//! Per-device input state and edge dispatch.
//!
//! [`InputContext`] owns the decoding state for a fixed number of encoders
//! and buttons. Every encoder (decoder, value and channel debounce windows)
//! and every button sits behind its own mutex, so notifications for
//! different devices never contend while CLK and DT edges of the same
//! encoder are serialised. Notifications are short, never block on I/O and
//! never `.await`, so they can be called from interrupt handlers or
//! executor tasks alike.
//!
//! Results are forwarded to an [`InputObserver`] while the device lock is
//! still held, so the last value reported for an encoder is always the value
//! it stores. Observers must therefore return quickly and must not block.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_time::Instant;

use crate::button::{ButtonDebouncer, ButtonId, Edge, PressEvent};
use crate::config::InputConfig;
use crate::debounce::DebounceWindow;
use crate::error::ConfigError;
use crate::quadrature::QuadratureDecoder;
use crate::value::{EncoderValue, ValueUpdate};

/// Index of an encoder within an [`InputContext`].
pub type EncoderId = usize;

/// One of the two quadrature channels of an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderPin {
    Clk,
    Dt,
}

/// Consumer of decoded input.
///
/// Called from inside the per-device lock. Implementations must not block;
/// reading back a value through [`InputContext::value`] is allowed.
pub trait InputObserver {
    /// An encoder value moved to `value`.
    fn on_value_changed(&self, encoder: EncoderId, value: i32);

    /// A button produced a debounced press.
    fn on_button_pressed(&self, button: ButtonId);
}

impl<T: InputObserver + ?Sized> InputObserver for &T {
    fn on_value_changed(&self, encoder: EncoderId, value: i32) {
        (**self).on_value_changed(encoder, value);
    }

    fn on_button_pressed(&self, button: ButtonId) {
        (**self).on_button_pressed(button);
    }
}

/// Decoded input as a message, for queue-based observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    ValueChanged { encoder: EncoderId, value: i32 },
    ButtonPressed { button: ButtonId },
}

/// Enqueue events without waiting.
///
/// A full queue drops the event (logged via `defmt` when that feature is
/// enabled); notifications must never suspend.
impl<M: RawMutex, const N: usize> InputObserver for Channel<M, InputEvent, N> {
    fn on_value_changed(&self, encoder: EncoderId, value: i32) {
        if self
            .try_send(InputEvent::ValueChanged { encoder, value })
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Event queue full, dropped value {} of encoder {}", value, encoder);
        }
    }

    fn on_button_pressed(&self, button: ButtonId) {
        if self.try_send(InputEvent::ButtonPressed { button }).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Event queue full, dropped press of button {}", button);
        }
    }
}

/// Everything owned by one physical encoder.
struct EncoderSlot {
    decoder: QuadratureDecoder,
    value: EncoderValue,
    clk_window: DebounceWindow,
    dt_window: DebounceWindow,
}

impl EncoderSlot {
    fn decode(&mut self, clk: bool, dt: bool) -> ValueUpdate {
        let direction = self.decoder.observe((clk, dt));
        self.value.apply(direction)
    }

    fn window_mut(&mut self, pin: EncoderPin) -> &mut DebounceWindow {
        match pin {
            EncoderPin::Clk => &mut self.clk_window,
            EncoderPin::Dt => &mut self.dt_window,
        }
    }
}

/// Decoding state for `ENCODERS` encoders and `BUTTONS` buttons.
///
/// `M` selects the lock: `CriticalSectionRawMutex` when notifications come
/// from interrupts, other cores or threads; `NoopRawMutex` when everything
/// runs on one executor.
///
/// # Examples
///
/// ```
/// use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
/// use embassy_sync::channel::Channel;
/// use embassy_time::Instant;
/// use rotary_input::{Edge, InputConfig, InputContext, InputEvent};
///
/// let events: Channel<CriticalSectionRawMutex, InputEvent, 4> = Channel::new();
/// let context: InputContext<CriticalSectionRawMutex, _, 2, 2> =
///     InputContext::new(InputConfig::default(), &events).unwrap();
///
/// context.notify_button_edge(1, Edge::Falling, Instant::from_millis(0));
/// assert_eq!(events.try_receive().ok(), Some(InputEvent::ButtonPressed { button: 1 }));
/// ```
pub struct InputContext<M: RawMutex, O, const ENCODERS: usize, const BUTTONS: usize> {
    config: InputConfig,
    encoders: [Mutex<M, RefCell<EncoderSlot>>; ENCODERS],
    buttons: [Mutex<M, RefCell<ButtonDebouncer>>; BUTTONS],
    observer: O,
}

impl<M, O, const ENCODERS: usize, const BUTTONS: usize> InputContext<M, O, ENCODERS, BUTTONS>
where
    M: RawMutex,
    O: InputObserver,
{
    /// Validate `config` and build fresh state for every encoder and button.
    ///
    /// Every encoder starts at `config.initial_value` with an uninitialized
    /// decoder.
    pub fn new(config: InputConfig, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;
        let value = EncoderValue::from_config(&config)?;

        Ok(Self {
            config,
            encoders: core::array::from_fn(|_| {
                Mutex::new(RefCell::new(EncoderSlot {
                    decoder: QuadratureDecoder::new(),
                    value,
                    clk_window: DebounceWindow::new(config.channel_debounce),
                    dt_window: DebounceWindow::new(config.channel_debounce),
                }))
            }),
            buttons: core::array::from_fn(|id| {
                Mutex::new(RefCell::new(ButtonDebouncer::new(id, config.button_debounce)))
            }),
            observer,
        })
    }

    // ── Encoder notifications ────────────────────────────────────────

    /// Decode the current CLK/DT levels of `encoder`.
    ///
    /// Call on every edge of either channel, after any external debounce.
    /// The first call per encoder only establishes a baseline. The observer
    /// is told about the new value only when it actually changed.
    ///
    /// Returns `None` for an unknown encoder (a silent no-op, logged via
    /// `defmt` when that feature is enabled).
    pub fn notify_channel_changed(
        &self,
        encoder: EncoderId,
        clk: bool,
        dt: bool,
    ) -> Option<ValueUpdate> {
        let update = self.encoder_slot(encoder)?.lock(|slot| {
            let update = slot.borrow_mut().decode(clk, dt);
            self.report(encoder, update);
            update
        });
        Some(update)
    }

    /// Debounce an edge on one channel of `encoder`, then decode.
    ///
    /// Edges arriving within `config.channel_debounce` of the last accepted
    /// edge on the same channel are dropped and return `None`, as does an
    /// unknown encoder. The window check and the decode happen under the
    /// same lock.
    pub fn notify_channel_edge(
        &self,
        encoder: EncoderId,
        pin: EncoderPin,
        clk: bool,
        dt: bool,
        now: Instant,
    ) -> Option<ValueUpdate> {
        self.encoder_slot(encoder)?.lock(|slot| {
            let update = {
                let mut slot = slot.borrow_mut();
                if !slot.window_mut(pin).accept(now) {
                    return None;
                }
                slot.decode(clk, dt)
            };
            self.report(encoder, update);
            Some(update)
        })
    }

    /// Current value of `encoder`, or `None` for an unknown encoder.
    pub fn value(&self, encoder: EncoderId) -> Option<i32> {
        self.encoders
            .get(encoder)
            .map(|slot| slot.lock(|slot| slot.borrow().value.get()))
    }

    // ── Button notifications ─────────────────────────────────────────

    /// Debounce an edge of `button` observed at `now`.
    ///
    /// Only falling edges can produce a press. Returns the press that was
    /// forwarded to the observer, if any.
    pub fn notify_button_edge(
        &self,
        button: ButtonId,
        edge: Edge,
        now: Instant,
    ) -> Option<PressEvent> {
        let Some(debouncer) = self.buttons.get(button) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("notify_button_edge: button {} out of bounds", button);
            return None;
        };

        debouncer.lock(|d| {
            let press = d.borrow_mut().on_edge(edge, now)?;
            #[cfg(feature = "defmt")]
            defmt::debug!("Button {} pressed", button);
            self.observer.on_button_pressed(press.button);
            Some(press)
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The validated configuration.
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// The observer receiving decoded input.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn encoder_slot(&self, encoder: EncoderId) -> Option<&Mutex<M, RefCell<EncoderSlot>>> {
        let slot = self.encoders.get(encoder);
        if slot.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Encoder {} out of bounds", encoder);
        }
        slot
    }

    /// Must run under the encoder's lock, after its `RefCell` borrow ends.
    fn report(&self, encoder: EncoderId, update: ValueUpdate) {
        if update.changed {
            #[cfg(feature = "defmt")]
            defmt::debug!("Encoder {}: value={}", encoder, update.value);
            self.observer.on_value_changed(encoder, update.value);
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
