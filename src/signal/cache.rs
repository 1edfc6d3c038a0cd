use derive_where::derive_where;

use super::SignalValue;
use crate::{simulation::SimCtx, watchable::WatchFormat};

/// The body of a signal and the value it produced in the latest evaluated
/// cycle. The body runs at most once per cycle, and a watched value is logged
/// only when it is computed.
#[derive_where(Debug; T)]
pub(crate) struct Cached<T: SignalValue> {
    last: Option<(usize, T)>,
    watch: Option<WatchFormat<T>>,
    #[derive_where(skip)]
    body: Box<dyn FnMut(&mut SimCtx) -> T>,
}

impl<T: SignalValue> Cached<T> {
    pub(crate) fn new(body: impl FnMut(&mut SimCtx) -> T + 'static) -> Self {
        Self {
            last: None,
            watch: None,
            body: Box::new(body),
        }
    }

    pub(crate) fn eval(&mut self, ctx: &mut SimCtx) -> T {
        let cycle = ctx.cycle();
        if let Some((at, value)) = &self.last {
            if *at == cycle {
                return value.clone();
            }
        }

        let value = (self.body)(ctx);
        if let Some(format) = self.watch.as_ref() {
            ctx.watch(&value, format);
        }
        self.last = Some((cycle, value.clone()));
        value
    }

    pub(crate) fn set_watch(&mut self, format: WatchFormat<T>) {
        self.watch = Some(format);
    }

    /// The most recently computed value.
    #[inline]
    pub(crate) fn current(&self) -> Option<&T> {
        self.last.as_ref().map(|(_, value)| value)
    }
}
