use stopwatch_hdl::prelude::{ClockDomain, Polarity, SyncKind};

/// A slow clock that keeps long simulations quick: 1000 cycles per
/// hundredth of a second.
pub struct Fast;

impl ClockDomain for Fast {
    const FREQ: usize = 100_000;
    const RESET_KIND: SyncKind = SyncKind::Sync;
    const RESET_POLARITY: Polarity = Polarity::ActiveHigh;
}

/// The 50 MHz oscillator of the board with an active-low reset button.
pub struct ZynqMini;

impl ClockDomain for ZynqMini {
    const FREQ: usize = 50_000_000;
    const RESET_KIND: SyncKind = SyncKind::Sync;
    const RESET_POLARITY: Polarity = Polarity::ActiveLow;
}
