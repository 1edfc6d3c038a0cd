mod cache;
mod counters;
mod ops;
mod reg;
mod sim;
mod source;
mod wrapped;

use std::{borrow::Cow, cell::RefCell, marker::PhantomData, rc::Rc};

use derive_where::derive_where;
pub use counters::{rise_every, rise_period, rise_rate};
pub use reg::{dff, reg, reg0, Reset};
pub use sim::SignalIterExt;
pub use source::Source;
pub use wrapped::Wrapped;

use self::cache::Cached;
use crate::{
    domain::ClockDomain,
    simulation::SimCtx,
    watchable::{AsDisplay, FmtKind, Watchable},
};

pub trait SignalValue: Clone + 'static {}

impl<T: SignalValue> SignalValue for Option<T> {}

impl<T: SignalValue, const N: usize> SignalValue for [T; N] {}

macro_rules! impl_signal_value {
    ($( $prim:ty ),+) => {
        $(
            impl SignalValue for $prim {}
        )+
    };
}

impl_signal_value!(bool, u8, u16, u32, u64, usize);

#[derive_where(Debug, Clone; T)]
pub struct Signal<D: ClockDomain, T: SignalValue> {
    #[derive_where(skip)]
    _dom: PhantomData<D>,
    body: Rc<RefCell<Cached<T>>>,
}

impl<D: ClockDomain, T: SignalValue> Signal<D, T> {
    pub(crate) fn new(f: impl FnMut(&mut SimCtx) -> T + 'static) -> Self {
        Self {
            _dom: PhantomData,
            body: Rc::new(RefCell::new(Cached::new(f))),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub(crate) fn next(&mut self, ctx: &mut SimCtx) -> T {
        self.body.borrow_mut().eval(ctx)
    }

    /// Logs the value of the signal under `name` once per cycle. Applies to
    /// every clone of the signal.
    pub fn watch(self, name: impl Into<Cow<'static, str>>) -> Self
    where
        T: Watchable<AsDisplay>,
    {
        self.watch_with(name)
    }

    pub fn watch_with<F: FmtKind, I: Into<Cow<'static, str>>>(self, name: I) -> Self
    where
        T: Watchable<F>,
    {
        self.body.borrow_mut().set_watch(T::watch_format(name));
        self
    }

    pub fn lift(value: T) -> Signal<D, T> {
        Self::new(move |_| value.clone())
    }

    pub fn map<U: SignalValue, F>(&self, f: F) -> Signal<D, U>
    where
        F: Fn(T) -> U + 'static,
    {
        let mut inner = self.clone();
        Signal::new(move |ctx| {
            let val = inner.next(ctx);
            (f)(val)
        })
    }

    /// Makes the current value of `self` available to the body of `f`
    /// (typically a register's next-state function).
    pub fn and_then<U: SignalValue, F>(&self, f: F) -> Signal<D, U>
    where
        F: FnOnce(Wrapped<D, T>) -> Signal<D, U>,
    {
        let mut wrapped = Wrapped::new(self.clone());
        let mut signal = f(wrapped.clone());
        Signal::new(move |ctx| {
            wrapped.eval(ctx);
            signal.next(ctx)
        })
    }

    /// Creates an input signal driven from outside the design.
    pub fn source(value: T) -> (Source<T>, Signal<D, T>) {
        let source = Source::new(value);
        let source_clone = source.clone();
        let signal = Signal::new(move |_| source_clone.value());

        (source, signal)
    }
}

impl<T: SignalValue, D: ClockDomain> From<T> for Signal<D, T> {
    fn from(value: T) -> Self {
        Self::lift(value)
    }
}

pub trait Bundle {
    type Bundled;

    fn bundle(self) -> Self::Bundled;
}

macro_rules! impl_bundle {
    ($( $t:ident => $s:ident ),+) => {
        impl<D: ClockDomain, $( $t: SignalValue ),+> Bundle for ($( Signal<D, $t>, )+) {
            type Bundled = Signal<D, ($( $t, )+)>;

            fn bundle(self) -> Self::Bundled {
                let ($( mut $s, )+) = self;
                Signal::new(move |ctx| ($( $s.next(ctx), )+))
            }
        }

        impl<$( $t: SignalValue ),+> SignalValue for ($( $t, )+) {}
    };
}

impl_bundle!(A => a);
impl_bundle!(A => a, B => b);
impl_bundle!(A => a, B => b, C => c);
impl_bundle!(A => a, B => b, C => c, E => e);
impl_bundle!(A => a, B => b, C => c, E => e, F => f);

impl<D: ClockDomain, T: SignalValue, const N: usize> Bundle for [Signal<D, T>; N] {
    type Bundled = Signal<D, [T; N]>;

    fn bundle(mut self) -> Self::Bundled {
        Signal::new(move |ctx| std::array::from_fn(|idx| self[idx].next(ctx)))
    }
}
