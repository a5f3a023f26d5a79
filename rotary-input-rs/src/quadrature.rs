//! Quadrature state machine for 2-channel incremental encoders.
//!
//! The CLK and DT channels of a detented encoder walk the Gray-code cycle
//! `00 → 01 → 11 → 10 → 00` when turned clockwise and the reverse cycle
//! when turned counter-clockwise. [`QuadratureDecoder`] remembers the last
//! observed [`ChannelState`] and classifies each new observation against a
//! fixed transition table.

/// Direction of a single decoded quadrature step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// One step along `00 → 01 → 11 → 10 → 00`.
    Clockwise,
    /// One step along `00 → 10 → 11 → 01 → 00`.
    CounterClockwise,
    /// No motion: first observation, repeated state, or an illegal jump.
    None,
}

impl Direction {
    /// Signed unit step: `+1`, `-1` or `0`.
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
            Direction::None => 0,
        }
    }
}

/// Instantaneous levels of the CLK and DT channels packed as a 2-bit code.
///
/// Bit 1 holds CLK and bit 0 holds DT, so `0b10` means CLK high, DT low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState(u8);

impl ChannelState {
    /// Pack a pair of channel levels.
    pub const fn from_levels(clk: bool, dt: bool) -> Self {
        Self(((clk as u8) << 1) | dt as u8)
    }

    /// Build from a raw code. Only the low two bits are kept.
    pub const fn from_code(code: u8) -> Self {
        Self(code & 0b11)
    }

    /// The packed 2-bit code.
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Level of the CLK channel.
    pub const fn clk(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// Level of the DT channel.
    pub const fn dt(self) -> bool {
        self.0 & 0b01 != 0
    }
}

impl From<(bool, bool)> for ChannelState {
    fn from((clk, dt): (bool, bool)) -> Self {
        Self::from_levels(clk, dt)
    }
}

const CW: Direction = Direction::Clockwise;
const CCW: Direction = Direction::CounterClockwise;
const NONE: Direction = Direction::None;

/// Transition table indexed by `previous << 2 | current`.
///
/// Only the eight single-bit transitions of the Gray cycle move. Repeated
/// states and diagonal jumps (both channels changed, i.e. a missed edge)
/// decode to [`Direction::None`] rather than a guessed double step.
#[rustfmt::skip]
const TRANSITIONS: [Direction; 16] = [
    // previous 00 → 00, 01, 10, 11
    NONE, CW, CCW, NONE,
    // previous 01 → 00, 01, 10, 11
    CCW, NONE, NONE, CW,
    // previous 10 → 00, 01, 10, 11
    CW, NONE, NONE, CCW,
    // previous 11 → 00, 01, 10, 11
    NONE, CCW, CW, NONE,
];

/// Look up the direction of a single transition.
pub const fn lookup(previous: ChannelState, current: ChannelState) -> Direction {
    TRANSITIONS[((previous.0 << 2) | current.0) as usize]
}

/// Per-encoder quadrature decoder.
///
/// Starts uninitialized; the first observation only records a baseline and
/// never reports motion. Every later observation is classified against the
/// previous one, and the previous state is replaced unconditionally so a
/// bounced or missed edge costs at most one step instead of leaving the
/// decoder out of phase.
///
/// # Examples
///
/// ```
/// use rotary_input::{Direction, QuadratureDecoder};
///
/// let mut decoder = QuadratureDecoder::new();
/// assert_eq!(decoder.observe((false, false)), Direction::None);
/// assert_eq!(decoder.observe((false, true)), Direction::Clockwise);
/// assert_eq!(decoder.observe((false, false)), Direction::CounterClockwise);
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    previous: Option<ChannelState>,
}

impl QuadratureDecoder {
    /// Create a decoder with no recorded baseline.
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// Classify the current `(clk, dt)` levels against the previous sample.
    pub fn observe(&mut self, levels: (bool, bool)) -> Direction {
        self.observe_state(ChannelState::from(levels))
    }

    /// Classify an already packed [`ChannelState`].
    pub fn observe_state(&mut self, current: ChannelState) -> Direction {
        let direction = match self.previous {
            Some(previous) => lookup(previous, current),
            None => Direction::None,
        };
        self.previous = Some(current);
        direction
    }

    /// The last observed state, or `None` before the first observation.
    pub fn previous(&self) -> Option<ChannelState> {
        self.previous
    }

    /// Forget the baseline. The next observation reports no motion.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CW_CYCLE: [u8; 4] = [0b00, 0b01, 0b11, 0b10];
    const CCW_CYCLE: [u8; 4] = [0b00, 0b10, 0b11, 0b01];

    fn feed(decoder: &mut QuadratureDecoder, code: u8) -> Direction {
        decoder.observe_state(ChannelState::from_code(code))
    }

    // ── ChannelState ─────────────────────────────────────────────────

    #[test]
    fn levels_pack_clk_into_high_bit() {
        assert_eq!(ChannelState::from_levels(false, false).code(), 0b00);
        assert_eq!(ChannelState::from_levels(false, true).code(), 0b01);
        assert_eq!(ChannelState::from_levels(true, false).code(), 0b10);
        assert_eq!(ChannelState::from_levels(true, true).code(), 0b11);

        let state = ChannelState::from_code(0b10);
        assert!(state.clk());
        assert!(!state.dt());
    }

    #[test]
    fn from_code_masks_upper_bits() {
        assert_eq!(ChannelState::from_code(0b1111_0110).code(), 0b10);
    }

    // ── Transition table ─────────────────────────────────────────────

    #[test]
    fn table_has_four_moves_each_way() {
        let mut cw = 0;
        let mut ccw = 0;
        for prev in 0..4u8 {
            for cur in 0..4u8 {
                match lookup(ChannelState::from_code(prev), ChannelState::from_code(cur)) {
                    Direction::Clockwise => cw += 1,
                    Direction::CounterClockwise => ccw += 1,
                    Direction::None => {}
                }
            }
        }
        assert_eq!(cw, 4);
        assert_eq!(ccw, 4);
    }

    #[test]
    fn repeated_and_diagonal_transitions_do_not_move() {
        for code in 0..4u8 {
            let s = ChannelState::from_code(code);
            assert_eq!(lookup(s, s), Direction::None);
            // Diagonal: both bits flipped.
            assert_eq!(lookup(s, ChannelState::from_code(code ^ 0b11)), Direction::None);
        }
    }

    #[test]
    fn sign_matches_direction() {
        assert_eq!(Direction::Clockwise.sign(), 1);
        assert_eq!(Direction::CounterClockwise.sign(), -1);
        assert_eq!(Direction::None.sign(), 0);
    }

    // ── Decoder ──────────────────────────────────────────────────────

    #[test]
    fn first_observation_is_always_none() {
        for code in 0..4u8 {
            let mut decoder = QuadratureDecoder::new();
            assert_eq!(feed(&mut decoder, code), Direction::None);
            assert_eq!(decoder.previous(), Some(ChannelState::from_code(code)));
        }
    }

    #[test]
    fn clockwise_cycles_sum_to_four_per_cycle() {
        let mut decoder = QuadratureDecoder::new();
        feed(&mut decoder, 0b00);

        let cycles = 5;
        let mut total = 0;
        for _ in 0..cycles {
            for &code in CW_CYCLE[1..].iter().chain(core::iter::once(&0b00)) {
                let dir = feed(&mut decoder, code);
                assert_eq!(dir, Direction::Clockwise);
                total += dir.sign();
            }
        }
        assert_eq!(total, 4 * cycles);
    }

    #[test]
    fn counter_clockwise_cycles_sum_to_four_per_cycle() {
        let mut decoder = QuadratureDecoder::new();
        feed(&mut decoder, 0b00);

        let cycles = 3;
        let mut steps = 0;
        for _ in 0..cycles {
            for &code in CCW_CYCLE[1..].iter().chain(core::iter::once(&0b00)) {
                assert_eq!(feed(&mut decoder, code), Direction::CounterClockwise);
                steps += 1;
            }
        }
        assert_eq!(steps, 4 * cycles);
    }

    #[test]
    fn recovers_after_illegal_jump() {
        let mut decoder = QuadratureDecoder::new();
        feed(&mut decoder, 0b00);

        // Missed edge: 00 -> 11 does not move but becomes the new baseline.
        assert_eq!(feed(&mut decoder, 0b11), Direction::None);
        assert_eq!(decoder.previous(), Some(ChannelState::from_code(0b11)));

        // 11 -> 10 is a legal clockwise step.
        assert_eq!(feed(&mut decoder, 0b10), Direction::Clockwise);
    }

    #[test]
    fn scenario_from_uninitialized() {
        let mut decoder = QuadratureDecoder::new();
        let dirs: std::vec::Vec<Direction> =
            [0b01, 0b11, 0b10, 0b00].iter().map(|&c| feed(&mut decoder, c)).collect();
        assert_eq!(
            dirs,
            [
                Direction::None,
                Direction::Clockwise,
                Direction::Clockwise,
                Direction::Clockwise
            ]
        );
    }

    #[test]
    fn reversing_mid_cycle() {
        let mut decoder = QuadratureDecoder::new();
        feed(&mut decoder, 0b00);
        assert_eq!(feed(&mut decoder, 0b01), Direction::Clockwise);
        assert_eq!(feed(&mut decoder, 0b11), Direction::Clockwise);
        assert_eq!(feed(&mut decoder, 0b01), Direction::CounterClockwise);
        assert_eq!(feed(&mut decoder, 0b00), Direction::CounterClockwise);
    }

    #[test]
    fn reset_restores_uninitialized() {
        let mut decoder = QuadratureDecoder::new();
        feed(&mut decoder, 0b00);
        decoder.reset();
        assert!(decoder.previous().is_none());
        assert_eq!(feed(&mut decoder, 0b01), Direction::None);
    }

    #[test]
    fn observe_takes_level_tuple() {
        let mut decoder = QuadratureDecoder::default();
        assert_eq!(decoder.observe((true, true)), Direction::None);
        assert_eq!(decoder.observe((true, false)), Direction::Clockwise);
    }
}
