use stopwatch_hdl::{prelude::*, simulation::Values};
use tracing::debug;

use crate::stimulus::Action;

/// Refresh rate of every display position.
pub const REFRESH_HZ: usize = 100;

/// The stopwatch with its display driver and the inputs a script can press.
pub struct Session<D: ClockDomain> {
    start: Source<bool>,
    clear: Source<bool>,
    test_value: Source<Bcd>,
    latch: Source<bool>,
    sim: Values<Signal<D, (StopwatchOutput, ScanOutput)>>,
}

impl<D: ClockDomain> Session<D> {
    pub fn new(refresh_hz: usize) -> Self {
        let clk = Clock::<D>::new();
        let rst = Reset::reset();
        let (start, start_signal) = Signal::source(false);
        let (clear, clear_signal) = Signal::source(false);
        let (test_value, test_value_signal) = Signal::source(Bcd::ZERO);
        let (latch, latch_signal) = Signal::source(false);

        let inputs = (start_signal, clear_signal, test_value_signal, latch_signal)
            .bundle()
            .map(|(start, clear, test_value, latch)| StopwatchInputs {
                start,
                clear,
                test_value,
                latch,
            });

        let display = stopwatch(&clk, &rst, &inputs);
        let scan = scan(&clk, &rst, &display, refresh_hz);

        Self {
            start,
            clear,
            test_value,
            latch,
            sim: (display, scan).bundle().simulate(),
        }
    }

    /// Holds the input of `action` high during the next cycle.
    pub fn apply(&self, action: Action) {
        debug!(cycle = self.cycle() + 1, ?action, "press");
        match action {
            Action::Start => {
                self.start.set_value(true);
            }
            Action::Clear => {
                self.clear.set_value(true);
            }
            Action::Latch(value) => {
                self.test_value.set_value(value);
                self.latch.set_value(true);
            }
        }
    }

    /// Evaluates one clock edge and releases all buttons.
    pub fn step(&mut self) -> (StopwatchOutput, ScanOutput) {
        let out = self.sim.next_cycle();
        for button in [&self.start, &self.clear, &self.latch] {
            button.set_value(false);
        }

        out
    }

    /// Number of evaluated cycles.
    pub fn cycle(&self) -> usize {
        self.sim.current_cycle()
    }
}
