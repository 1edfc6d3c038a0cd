//! The stopwatch counter: start/pause, clear, a test override of the
//! digits, and display blanking.

use std::fmt::{self, Display};

use tracing::{debug, trace};

use crate::{
    bcd::Bcd,
    display::DisplayMask,
    domain::{clk_divider, Clock, ClockDomain, MILLISECOND},
    signal::{reg, Reset, Signal, SignalValue},
};

/// Clock cycles in one hundredth of a second.
pub const fn centisecond_cycles<D: ClockDomain>() -> usize {
    clk_divider::<D>(10 * MILLISECOND)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StopwatchInputs {
    /// Start/pause button, a press toggles between running and paused.
    pub start: bool,
    /// Clears the time while paused.
    pub clear: bool,
    pub test_value: Bcd,
    /// Loads `test_value` into the digits.
    pub latch: bool,
}

impl SignalValue for StopwatchInputs {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopwatchState {
    pub paused: bool,
    start_prev: bool,
    pub subtick: usize,
    pub digits: Bcd,
}

impl SignalValue for StopwatchState {}

impl Default for StopwatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchState {
    pub const fn new() -> Self {
        Self {
            paused: true,
            start_prev: false,
            subtick: 0,
            digits: Bcd::ZERO,
        }
    }

    /// State after one clock edge. `threshold` is the number of cycles per
    /// increment of the digits.
    #[must_use]
    pub fn next(&self, inputs: &StopwatchInputs, threshold: usize) -> Self {
        let mut next = *self;

        next.start_prev = inputs.start;
        if inputs.start && !self.start_prev {
            next.paused = !self.paused;
            debug!(paused = next.paused, digits = %self.digits, "start pressed");
        }

        if self.paused {
            if inputs.clear {
                next.subtick = 0;
                next.digits = Bcd::ZERO;
                if !self.digits.is_zero() {
                    debug!(digits = %self.digits, "cleared");
                }
            }
        } else if self.subtick + 1 >= threshold {
            next.subtick = 0;
            next.digits = self.digits.incr_within(Bcd::MAX);
            trace!(digits = %next.digits, "tick");
        } else {
            next.subtick = self.subtick + 1;
        }

        if inputs.latch {
            next.digits = inputs.test_value;
            debug!(digits = %inputs.test_value, "test value latched");
        }

        next
    }

    pub fn output(&self) -> StopwatchOutput {
        StopwatchOutput {
            digits: self.digits,
            mask: DisplayMask::from_digits(self.digits),
            running: !self.paused,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StopwatchOutput {
    pub digits: Bcd,
    pub mask: DisplayMask,
    pub running: bool,
}

impl SignalValue for StopwatchOutput {}

impl Display for StopwatchOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.digits,
            self.mask,
            if self.running { "running" } else { "paused" }
        )
    }
}

/// The clocked stopwatch. Outputs reflect the inputs of the previous cycles;
/// the first cycle shows the reset state.
pub fn stopwatch<D: ClockDomain>(
    clk: &Clock<D>,
    rst: &Reset<D>,
    inputs: &Signal<D, StopwatchInputs>,
) -> Signal<D, StopwatchOutput> {
    let threshold = centisecond_cycles::<D>();

    inputs
        .and_then(|inputs| {
            reg(clk, rst, &StopwatchState::new(), move |state| {
                match inputs.try_value() {
                    Some(inputs) => state.next(&inputs, threshold),
                    None => state,
                }
            })
        })
        .map(|state| state.output())
}
