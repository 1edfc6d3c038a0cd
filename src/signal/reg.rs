use super::{Signal, SignalValue};
use crate::domain::{Clock, ClockDomain, SyncKind};

/// Logical reset: `true` means the reset is asserted.
#[allow(type_alias_bounds)]
pub type Reset<D: ClockDomain> = Signal<D, bool>;

impl<D: ClockDomain> Reset<D> {
    /// A reset that is never asserted.
    pub fn reset() -> Self {
        Self::lift(false)
    }

    pub fn reset_src() -> (super::Source<bool>, Self) {
        Self::source(false)
    }

    /// Converts the level of a physical reset pin using the domain's polarity.
    pub fn from_pin(pin: &Signal<D, bool>) -> Self {
        pin.map(|level| D::RESET_POLARITY.bool(level))
    }
}

#[inline]
pub fn reg<D: ClockDomain, T: SignalValue>(
    clk: &Clock<D>,
    rst: &Reset<D>,
    init: &T,
    comb_fn: impl Fn(T) -> T + 'static,
) -> Signal<D, T> {
    dff::<D, T>(clk, rst, init, comb_fn, D::RESET_KIND)
}

#[inline]
pub fn reg0<D: ClockDomain, T: SignalValue + Default>(
    clk: &Clock<D>,
    rst: &Reset<D>,
    comb_fn: impl Fn(T) -> T + 'static,
) -> Signal<D, T> {
    reg(clk, rst, &T::default(), comb_fn)
}

/// A register that outputs `init` in the first cycle and `comb_fn(prev)`
/// afterwards.
///
/// A synchronous reset is sampled on one edge and loads `init` on the next,
/// an asynchronous one loads `init` in the cycle it is asserted.
pub fn dff<D: ClockDomain, T: SignalValue>(
    _clk: &Clock<D>,
    rst: &Reset<D>,
    init: &T,
    comb_fn: impl Fn(T) -> T + 'static,
    rst_kind: SyncKind,
) -> Signal<D, T> {
    let mut rst = rst.clone();
    let init = init.clone();

    let mut next_val = init.clone();
    let mut rst_sampled = false;

    Signal::new(move |ctx| {
        let rst = rst.next(ctx);
        let reset = match rst_kind {
            SyncKind::Sync => rst_sampled,
            SyncKind::Async => rst,
        };
        rst_sampled = rst;

        let val = if reset {
            init.clone()
        } else {
            next_val.clone()
        };
        next_val = (comb_fn)(val.clone());
        val
    })
}
