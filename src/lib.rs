pub mod bcd;
pub mod display;
pub mod domain;
pub mod scan;
pub mod seven_seg;
pub mod signal;
pub mod simulation;
pub mod stopwatch;
pub mod trace;
pub mod watchable;

pub mod prelude {
    pub use crate::{
        bcd::Bcd,
        display::{render, DisplayMask},
        domain::{clk_divider, hz_to_period, Clock, ClockDomain, Polarity, SyncKind},
        scan::{scan, ScanOutput},
        seven_seg::{Segment, Segments},
        signal::{reg, reg0, rise_rate, Bundle, Reset, Signal, SignalIterExt, SignalValue, Source},
        simulation::Simulate,
        stopwatch::{
            centisecond_cycles, stopwatch, StopwatchInputs, StopwatchOutput, StopwatchState,
        },
        trace::{TraceVars, Traceable, Tracer},
        watchable::{AsBinary, AsDisplay, AsLowerHex},
    };
}
