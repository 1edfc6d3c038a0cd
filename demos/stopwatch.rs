use stopwatch_hdl::prelude::*;

pub struct ZynqMiniDom;

impl ClockDomain for ZynqMiniDom {
    const FREQ: usize = 50_000_000;
    const RESET_KIND: SyncKind = SyncKind::Sync;
    const RESET_POLARITY: Polarity = Polarity::ActiveLow;
}

/// Display refresh rate of the scanned digits.
const REFRESH_HZ: usize = 1_000;

pub struct Pins<D: ClockDomain> {
    pub rst_n: Signal<D, bool>,
    pub start: Signal<D, bool>,
    pub clear: Signal<D, bool>,
    pub test_value: Signal<D, Bcd>,
    pub latch: Signal<D, bool>,
}

pub fn top_module<D: ClockDomain>(
    clk: &Clock<D>,
    pins: Pins<D>,
) -> (Signal<D, StopwatchOutput>, Signal<D, ScanOutput>) {
    let rst = Reset::from_pin(&pins.rst_n);
    let inputs = (pins.start, pins.clear, pins.test_value, pins.latch)
        .bundle()
        .map(|(start, clear, test_value, latch)| StopwatchInputs {
            start,
            clear,
            test_value,
            latch,
        });

    let display = stopwatch(clk, &rst, &inputs);
    let scanned = scan(clk, &rst, &display, REFRESH_HZ);

    (display, scanned)
}

fn main() {
    let clk = Clock::<ZynqMiniDom>::new();
    let (start, start_pin) = Signal::source(false);
    let pins = Pins {
        rst_n: Signal::lift(true),
        start: start_pin,
        clear: Signal::lift(false),
        test_value: Signal::lift(Bcd::ZERO),
        latch: Signal::lift(false),
    };

    let (display, _) = top_module(&clk, pins);
    let mut sim = display.simulate();

    start.press(|| sim.next_cycle());

    // A quarter of a second of board time.
    let cycles = centisecond_cycles::<ZynqMiniDom>() * 25;
    if let Some(out) = sim.skip_cycles(cycles) {
        println!("{} {}", render(out.digits, out.mask), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSystem;

    impl ClockDomain for TestSystem {
        const FREQ: usize = 8_000;
        const RESET_KIND: SyncKind = SyncKind::Sync;
        const RESET_POLARITY: Polarity = Polarity::ActiveLow;
    }

    #[test]
    fn counts_after_start() {
        let clk = Clock::<TestSystem>::new();
        let (start, start_pin) = Signal::source(false);
        let pins = Pins {
            rst_n: Signal::lift(true),
            start: start_pin,
            clear: Signal::lift(false),
            test_value: Signal::lift(Bcd::ZERO),
            latch: Signal::lift(false),
        };

        let (display, scanned) = top_module(&clk, pins);
        let mut sim = (display, scanned).bundle().simulate();

        start.press(|| sim.next_cycle());
        let (out, _) = sim
            .skip_cycles(centisecond_cycles::<TestSystem>() * 10 + 1)
            .unwrap();

        assert_eq!(out.digits, "0.10".parse::<Bcd>().unwrap());
        assert!(out.running);
    }
}
