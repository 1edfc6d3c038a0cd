//! Time-multiplexed driver for a common-anode/cathode eight-digit display:
//! one position is lit at a time, fast enough to look steady.

use std::io;

use crate::{
    bcd::DIGITS,
    domain::{Clock, ClockDomain},
    seven_seg::Segments,
    signal::{reg0, rise_rate, Reset, Signal, SignalValue},
    stopwatch::StopwatchOutput,
    trace::{IdCode, TraceVars, Traceable, Tracer},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOutput {
    /// One-hot select of the lit position, zero while it is blanked.
    pub anode: u8,
    pub segments: Segments,
}

impl SignalValue for ScanOutput {}

impl ScanOutput {
    pub fn select(pos: usize, display: &StopwatchOutput) -> Self {
        if display.mask.is_digit_on(pos) {
            Self {
                anode: 1 << pos,
                segments: Segments::encode(display.digits.digit(pos))
                    .with_point(display.mask.is_point_on(pos)),
            }
        } else {
            Self::default()
        }
    }
}

/// Cycles through the eight positions so that every position is refreshed
/// `refresh_hz` times per second.
pub fn scan<D: ClockDomain>(
    clk: &Clock<D>,
    rst: &Reset<D>,
    display: &Signal<D, StopwatchOutput>,
    refresh_hz: usize,
) -> Signal<D, ScanOutput> {
    let step = rise_rate(clk, rst, refresh_hz * DIGITS);

    let pos = step.and_then(|step| {
        reg0(clk, rst, move |pos: usize| {
            if step.try_value().unwrap_or(false) {
                (pos + 1) % DIGITS
            } else {
                pos
            }
        })
    });

    pos.apply2(display, |pos, display| ScanOutput::select(pos, &display))
}

impl Traceable for ScanOutput {
    fn add_vars(vars: &mut TraceVars) {
        vars.add_field::<u8>("anode");
        vars.add_field::<Segments>("segments");
    }

    fn trace(&self, id: &mut IdCode, tracer: &mut Tracer) -> io::Result<()> {
        self.anode.trace(id, tracer)?;
        self.segments.trace(id, tracer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bcd::Bcd,
        display::DisplayMask,
        domain::TestDomain,
        simulation::Simulate,
    };

    type TD800 = TestDomain<800>;

    fn display(packed: u32) -> StopwatchOutput {
        let digits = Bcd::from_packed(packed);
        StopwatchOutput {
            digits,
            mask: DisplayMask::from_digits(digits),
            running: true,
        }
    }

    #[test]
    fn select_blanked() {
        let out = display(0x0000_0123);

        assert_eq!(ScanOutput::select(5, &out), ScanOutput::default());
        assert_eq!(ScanOutput::select(2, &out), ScanOutput {
            anode: 0b100,
            segments: Segments::encode(1).with_point(true),
        });
        assert_eq!(ScanOutput::select(0, &out), ScanOutput {
            anode: 0b1,
            segments: Segments::encode(3),
        });
    }

    #[test]
    fn rotates_positions() {
        let clk = Clock::<TD800>::new();
        let out = Signal::lift(display(0x1234_5678));
        let s = scan(&clk, &Reset::reset(), &out, 100);

        let values = s.simulate().take(10).collect::<Vec<_>>();
        assert_eq!(
            values.iter().map(|v| v.anode).collect::<Vec<_>>(),
            [1, 1, 2, 4, 8, 16, 32, 64, 128, 1]
        );
        assert_eq!(values[3].segments, Segments::encode(6).with_point(true));
        assert_eq!(values[8].segments, Segments::encode(1));
    }
}
