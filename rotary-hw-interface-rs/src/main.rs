//! rotary-hw-interface
//!
//! Rotary encoder panel firmware for the Raspberry Pi Pico 2. Wires GPIO
//! edges into the `rotary-input` decoding core and reports the results over
//! defmt RTT:
//!
//! 1. A knob is turned; its CLK or DT pin changes level.
//! 2. The encoder task for that knob wakes on the edge, samples both levels
//!    and hands them to the shared `InputContext`.
//! 3. The context debounces the channel, decodes the quadrature step,
//!    clamps the value and, if it moved, queues an `InputEvent`.
//! 4. The report task drains the queue and logs "Encoder N value: V".
//!
//! Shaft switches follow the same path on their falling edge and log
//! "Encoder N button pressed".
//!
//! # Wiring
//!
//! | Signal     | Pico 2 Pin | Notes                  |
//! |------------|------------|------------------------|
//! | ENC1 CLK   | GP17       | pull-up enabled        |
//! | ENC1 DT    | GP18       | pull-up enabled        |
//! | ENC1 SW    | GP27       | active-low, pull-up    |
//! | ENC2 CLK   | GP22       | pull-up enabled        |
//! | ENC2 DT    | GP23       | pull-up enabled        |
//! | ENC2 SW    | GP24       | active-low, pull-up    |

#![no_std]
#![no_main]

mod config;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Instant, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rotary_input::{ButtonId, Edge, EncoderId, EncoderPin, InputContext, InputEvent};

use crate::config::{BUTTON_COUNT, ENCODER_COUNT, EVENT_QUEUE_DEPTH, STATUS_INTERVAL};

// ---------------------------------------------------------------------------
// Boot block
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

type EventChannel = Channel<CriticalSectionRawMutex, InputEvent, EVENT_QUEUE_DEPTH>;

/// Decoded input on its way from the edge handlers to the report task.
static EVENTS: EventChannel = Channel::new();

/// Decoding state for every knob and switch. Edge handlers on different
/// tasks share it; each encoder and switch is locked independently.
type Context =
    InputContext<CriticalSectionRawMutex, &'static EventChannel, ENCODER_COUNT, BUTTON_COUNT>;

static CONTEXT: StaticCell<Context> = StaticCell::new();

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Edge-driven quadrature monitor for one encoder.
///
/// Waits for either channel to change, samples both levels and forwards
/// them with the edge timestamp. Debounce, decoding and clamping happen in
/// the context.
#[embassy_executor::task(pool_size = 2)]
async fn encoder_task(
    encoder: EncoderId,
    mut clk: Input<'static>,
    mut dt: Input<'static>,
    context: &'static Context,
) {
    info!("Encoder {} monitor started", encoder + 1);

    // Baseline from the resting levels so the first detent already counts.
    context.notify_channel_changed(encoder, clk.is_high(), dt.is_high());

    loop {
        let pin = match select(clk.wait_for_any_edge(), dt.wait_for_any_edge()).await {
            Either::First(()) => EncoderPin::Clk,
            Either::Second(()) => EncoderPin::Dt,
        };

        context.notify_channel_edge(encoder, pin, clk.is_high(), dt.is_high(), Instant::now());
    }
}

/// Falling-edge monitor for one shaft switch.
#[embassy_executor::task(pool_size = 2)]
async fn button_task(button: ButtonId, mut pin: Input<'static>, context: &'static Context) {
    info!("Button {} monitor started", button + 1);

    loop {
        pin.wait_for_falling_edge().await;
        context.notify_button_edge(button, Edge::Falling, Instant::now());
    }
}

/// Drains decoded input and logs it.
#[embassy_executor::task]
async fn report_task(events: &'static EventChannel) {
    loop {
        match events.receive().await {
            InputEvent::ValueChanged { encoder, value } => {
                info!("Encoder {} value: {}", encoder + 1, value)
            }
            InputEvent::ButtonPressed { button } => {
                info!("Encoder {} button pressed", button + 1)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("rotary-hw-interface starting");

    let input_config = config::input_config();
    info!(
        "Range {}..={}, step {}, start {}",
        input_config.min_value, input_config.max_value, input_config.step, input_config.initial_value
    );

    let context = match InputContext::new(input_config, &EVENTS) {
        Ok(context) => CONTEXT.init(context),
        Err(e) => {
            error!("Invalid input configuration: {}", e);
            return;
        }
    };

    // —— Pins ————————————————————————————————————————————————————————————————
    // Encoders idle high through the pull-ups; switches pull low when pressed.
    let enc1_clk = Input::new(p.PIN_17, Pull::Up);
    let enc1_dt = Input::new(p.PIN_18, Pull::Up);
    let enc1_sw = Input::new(p.PIN_27, Pull::Up);

    let enc2_clk = Input::new(p.PIN_22, Pull::Up);
    let enc2_dt = Input::new(p.PIN_23, Pull::Up);
    let enc2_sw = Input::new(p.PIN_24, Pull::Up);

    // —— Spawn tasks —————————————————————————————————————————————————————————

    spawner.spawn(report_task(&EVENTS)).unwrap();
    spawner.spawn(encoder_task(0, enc1_clk, enc1_dt, context)).unwrap();
    spawner.spawn(encoder_task(1, enc2_clk, enc2_dt, context)).unwrap();
    spawner.spawn(button_task(0, enc1_sw, context)).unwrap();
    spawner.spawn(button_task(1, enc2_sw, context)).unwrap();

    info!("Rotary encoder panel running");

    // Idle loop; all work happens in the edge tasks.
    let mut uptime_secs = 0u64;
    loop {
        Timer::after(STATUS_INTERVAL).await;
        uptime_secs += STATUS_INTERVAL.as_secs();
        debug!(
            "Uptime {}s, values [{}, {}]",
            uptime_secs,
            context.value(0),
            context.value(1)
        );
    }
}
