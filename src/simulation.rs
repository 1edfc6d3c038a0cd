use tracing::info;

use crate::watchable::WatchFormat;

#[derive(Debug, Default)]
pub struct SimCtx {
    cycle: usize,
}

impl SimCtx {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of rising edges evaluated so far.
    #[inline]
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    pub(crate) fn next_cycle(&mut self) {
        self.cycle = self.cycle.wrapping_add(1);
    }

    pub(crate) fn watch<T>(&self, value: &T, format: &WatchFormat<T>) {
        info!(target: "watch", cycle = self.cycle, "{}", format.show(value));
    }
}

pub trait Simulate: Sized {
    type Value;

    fn next(&mut self, ctx: &mut SimCtx) -> Self::Value;

    fn simulate(self) -> Values<Self> {
        Values {
            ctx: SimCtx::new(),
            source: self,
        }
    }
}

/// Evaluates a design one rising clock edge per item.
#[derive(Debug)]
pub struct Values<S> {
    ctx: SimCtx,
    source: S,
}

impl<S: Simulate> Values<S> {
    pub fn next_cycle(&mut self) -> S::Value {
        self.ctx.next_cycle();
        self.source.next(&mut self.ctx)
    }

    /// Number of cycles evaluated so far.
    #[inline]
    pub fn current_cycle(&self) -> usize {
        self.ctx.cycle()
    }

    /// Runs `n` cycles and returns the value of the last one.
    pub fn skip_cycles(&mut self, n: usize) -> Option<S::Value> {
        (0..n).fold(None, |_, _| Some(self.next_cycle()))
    }
}

impl<S: Simulate> Iterator for Values<S> {
    type Item = S::Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_cycle())
    }
}
