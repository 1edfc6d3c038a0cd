use std::ops::Not;

use super::{Signal, SignalValue};
use crate::domain::ClockDomain;

impl<D: ClockDomain, T: SignalValue> Signal<D, T> {
    pub fn apply2<U: SignalValue, V: SignalValue, F>(
        &self,
        other: &Signal<D, U>,
        f: F,
    ) -> Signal<D, V>
    where
        F: Fn(T, U) -> V + 'static,
    {
        let mut this = self.clone();
        let mut other = other.clone();

        Signal::new(move |ctx| {
            let this = this.next(ctx);
            let other = other.next(ctx);
            (f)(this, other)
        })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn eq(&self, other: &Signal<D, T>) -> Signal<D, bool>
    where
        T: PartialEq,
    {
        self.apply2(other, |lhs, rhs| lhs == rhs)
    }
}

impl<D: ClockDomain> Signal<D, bool> {
    pub fn and(&self, other: &Signal<D, bool>) -> Signal<D, bool> {
        self.apply2(other, |lhs, rhs| lhs && rhs)
    }

    pub fn or(&self, other: &Signal<D, bool>) -> Signal<D, bool> {
        self.apply2(other, |lhs, rhs| lhs || rhs)
    }
}

impl<D: ClockDomain, T: SignalValue> Not for Signal<D, T>
where
    T: Not,
    <T as Not>::Output: SignalValue,
{
    type Output = Signal<D, <T as Not>::Output>;

    fn not(self) -> Self::Output {
        self.map(|val| val.not())
    }
}

impl<D: ClockDomain, T: SignalValue> Not for &'_ Signal<D, T>
where
    T: Not,
    <T as Not>::Output: SignalValue,
{
    type Output = Signal<D, <T as Not>::Output>;

    fn not(self) -> Self::Output {
        self.map(|val| val.not())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::TD4,
        signal::{Bundle, SignalIterExt},
        simulation::Simulate,
    };

    #[test]
    fn logic_ops() {
        let a = [false, true, true, false].into_iter().into_signal::<TD4>();
        let b = [false, false, true, true].into_iter().into_signal::<TD4>();

        let and = a.and(&b);
        let or = a.or(&b);
        let not_a = !&a;

        let res = (and, or, not_a).bundle().simulate().take(4).collect::<Vec<_>>();
        assert_eq!(res, [
            (false, false, true),
            (false, true, false),
            (true, true, false),
            (false, true, true)
        ]);
    }

    #[test]
    fn compare() {
        let a = [1_u8, 2, 3].into_iter().into_signal::<TD4>();
        let b = [1_u8, 0, 3].into_iter().into_signal::<TD4>();

        assert_eq!(a.eq(&b).simulate().take(3).collect::<Vec<_>>(), [
            true, false, true
        ]);
    }
}
