use stopwatch_hdl::{
    domain::{TD100, TD400},
    prelude::*,
    simulation::Values,
    watchable::AsDebug,
};

struct Bench<D: ClockDomain> {
    rst: Source<bool>,
    start: Source<bool>,
    clear: Source<bool>,
    test_value: Source<Bcd>,
    latch: Source<bool>,
    sim: Values<Signal<D, StopwatchOutput>>,
}

impl<D: ClockDomain> Bench<D> {
    fn new() -> Self {
        let clk = Clock::<D>::new();
        let (rst, rst_signal) = Reset::reset_src();
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

        Self {
            rst,
            start,
            clear,
            test_value,
            latch,
            sim: stopwatch(&clk, &rst_signal, &inputs).simulate(),
        }
    }

    fn cycle(&mut self) -> StopwatchOutput {
        self.sim.next_cycle()
    }

    fn cycles(&mut self, n: usize) -> StopwatchOutput {
        self.sim.skip_cycles(n).unwrap()
    }

    fn press(&mut self, button: Source<bool>) -> StopwatchOutput {
        button.press(|| self.cycle())
    }

    fn press_start(&mut self) -> StopwatchOutput {
        self.press(self.start.clone())
    }

    fn press_clear(&mut self) -> StopwatchOutput {
        self.press(self.clear.clone())
    }

    fn latch(&mut self, value: Bcd) -> StopwatchOutput {
        self.test_value.set_value(value);
        self.press(self.latch.clone())
    }
}

fn time(s: &str) -> Bcd {
    s.parse().unwrap()
}

#[test]
fn first_cycle_shows_reset_state() {
    let mut bench = Bench::<TD100>::new();
    let out = bench.cycle();

    assert_eq!(out.digits, Bcd::ZERO);
    assert!(!out.running);
    assert_eq!(render(out.digits, out.mask), "     0.00");
}

#[test]
fn stays_paused_without_start() {
    let mut bench = Bench::<TD100>::new();

    assert_eq!(bench.cycles(500).digits, Bcd::ZERO);
}

#[test]
fn counts_centiseconds() {
    let mut bench = Bench::<TD100>::new();
    bench.press_start();
    // The press is registered on the following edge.
    bench.cycle();

    let mut elapsed = 0;
    for n in [1, 99, 100, 5_999, 6_000, 12_345] {
        let out = bench.cycles(n - elapsed);
        elapsed = n;

        assert_eq!(out.digits, Bcd::from_centiseconds(n as u32), "after {n} cs");
        assert_eq!(out.mask, DisplayMask::from_digits(out.digits));
        assert!(out.running);
    }
}

#[test]
fn tick_threshold_follows_clock() {
    assert_eq!(centisecond_cycles::<TD400>(), 4);

    let mut bench = Bench::<TD400>::new();
    bench.press_start();
    bench.cycle();

    assert_eq!(bench.cycles(3).digits, Bcd::ZERO);
    assert_eq!(bench.cycle().digits, time("0.01"));
    assert_eq!(bench.cycles(4 * 99).digits, time("1.00"));
}

#[test]
fn wraps_after_max() {
    let mut bench = Bench::<TD100>::new();
    bench.press_start();
    bench.latch(time("99:59:59.98"));

    assert_eq!(bench.cycle().digits, time("99:59:59.98"));
    assert_eq!(bench.cycle().digits, Bcd::MAX);
    assert_eq!(bench.cycle().digits, Bcd::ZERO);
    assert_eq!(bench.cycle().digits, time("0.01"));
}

#[test]
fn latch_overrides_increment() {
    let mut bench = Bench::<TD100>::new();
    bench.press_start();
    bench.cycles(10);

    let value = time("12:34:56.78");
    bench.latch(value);
    let out = bench.cycle();

    assert_eq!(out.digits, value);
    assert!(out.running);
}

#[test]
fn latch_while_paused_is_held() {
    let mut bench = Bench::<TD100>::new();
    bench.latch(Bcd::from_packed(0xabcd_ef01));

    let out = bench.cycles(20);
    assert_eq!(out.digits.packed(), 0xabcd_ef01);
    assert_eq!(out.mask.digits, 0xff);
}

#[test]
fn clear_only_while_paused() {
    let mut bench = Bench::<TD100>::new();
    bench.press_start();
    bench.cycles(50);

    bench.press_clear();
    let running = bench.cycle();
    assert!(running.running);
    assert_eq!(running.digits, Bcd::from_centiseconds(51));

    // The pressing edge still counts.
    bench.press_start();
    let paused = bench.cycle();
    assert!(!paused.running);
    assert_eq!(paused.digits, Bcd::from_centiseconds(53));
    assert_eq!(bench.cycles(10).digits, paused.digits);

    bench.press_clear();
    let out = bench.cycle();
    assert_eq!(out.digits, Bcd::ZERO);
    assert!(!out.running);
}

#[test]
fn start_toggles_regardless_of_other_inputs() {
    let mut bench = Bench::<TD100>::new();
    bench.clear.set_value(true);
    bench.latch.set_value(true);

    let mut running = false;
    for _ in 0..6 {
        bench.press_start();
        running = !running;
        assert_eq!(bench.cycle().running, running);
    }
}

#[test]
fn reset_restores_initial_state() {
    let mut bench = Bench::<TD100>::new();
    bench.press_start();
    bench.cycles(30);

    bench.rst.set_value(true);
    bench.cycles(2);
    bench.rst.set_value(false);

    let out = bench.cycle();
    assert_eq!(out.digits, Bcd::ZERO);
    assert!(!out.running);
    assert_eq!(bench.cycles(10).digits, Bcd::ZERO);
}

#[test]
fn display_follows_magnitude() {
    let mut bench = Bench::<TD100>::new();
    bench.latch(time("59.99"));
    bench.press_start();

    let out = bench.cycle();
    assert_eq!(render(out.digits, out.mask), "    59.99");

    let out = bench.cycle();
    assert_eq!(render(out.digits, out.mask), "   1.00.00");
}

#[test]
fn watched_signal_keeps_values() {
    let clk = Clock::<TD100>::new();
    let (start, start_signal) = Signal::source(false);
    let inputs = start_signal
        .map(|start| StopwatchInputs {
            start,
            ..Default::default()
        })
        .watch_with::<AsDebug, _>("inputs");
    let out = stopwatch(&clk, &Reset::reset(), &inputs)
        .map(|out| out.digits)
        .watch("digits");

    let mut sim = out.simulate();
    start.press(|| sim.next_cycle());
    assert_eq!(sim.skip_cycles(4), Some(time("0.03")));
}
