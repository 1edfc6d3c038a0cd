use super::{Signal, SignalValue};
use crate::{
    domain::ClockDomain,
    simulation::{SimCtx, Simulate},
};

impl<D: ClockDomain, T: SignalValue> Simulate for Signal<D, T> {
    type Value = T;

    fn next(&mut self, ctx: &mut SimCtx) -> Self::Value {
        self.next(ctx)
    }
}

pub trait SignalIterExt: IntoIterator + Sized
where
    Self::Item: SignalValue,
{
    /// Drives a signal from the items of an iterator, one item per cycle. The
    /// last item is held once the iterator is exhausted.
    ///
    /// # Panics
    ///
    /// Evaluating the signal panics if the iterator yields no items at all.
    fn into_signal<D: ClockDomain>(self) -> Signal<D, Self::Item>;
}

impl<I> SignalIterExt for I
where
    I: IntoIterator + Sized,
    I::IntoIter: 'static,
    I::Item: SignalValue,
{
    fn into_signal<D: ClockDomain>(self) -> Signal<D, Self::Item> {
        let mut items = self.into_iter();
        let mut held = None;
        Signal::new(move |_| {
            if let Some(item) = items.next() {
                held = Some(item);
            }
            match &held {
                Some(item) => item.clone(),
                None => panic!("signal iterator yielded no items"),
            }
        })
    }
}
