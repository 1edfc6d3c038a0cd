use std::cell::RefCell;

use derive_where::derive_where;

use super::{Signal, SignalValue};
use crate::{domain::ClockDomain, simulation::SimCtx};

/// A view of a signal's value in the current cycle, usable from inside a
/// register body.
#[derive_where(Debug, Clone; T)]
pub struct Wrapped<D: ClockDomain, T: SignalValue>(Signal<D, T>);

impl<D: ClockDomain, T: SignalValue> Wrapped<D, T> {
    pub(super) fn new(signal: Signal<D, T>) -> Self {
        Self(signal)
    }

    /// Returns `None` before the wrapped signal has been evaluated once.
    #[inline]
    pub fn try_value(&self) -> Option<T> {
        RefCell::borrow(&self.0.body).current().cloned()
    }

    #[inline]
    pub fn value_or(&self, default: T) -> T {
        self.try_value().unwrap_or(default)
    }

    pub(crate) fn eval(&mut self, ctx: &mut SimCtx) {
        self.0.next(ctx);
    }

    #[inline]
    pub fn into_signal(self) -> Signal<D, T> {
        self.0
    }
}
