use std::{
    fmt::{self, Display},
    marker::PhantomData,
};

use derive_where::derive_where;

pub const SECOND: usize = 1_000_000_000_000;
pub const MILLISECOND: usize = 1_000_000_000;
pub const MICROSECOND: usize = 1_000_000;
pub const NANOSECOND: usize = 1_000;
pub const PICOSECOND: usize = 1;

pub const fn hz_to_period(freq: usize) -> usize {
    assert!(freq > 0 && SECOND >= freq);
    SECOND / freq
}

/// Number of clock cycles of the domain `D` that fit into `ps` picoseconds.
pub const fn clk_divider<D: ClockDomain>(ps: usize) -> usize {
    assert!(ps >= D::PERIOD);
    ps / D::PERIOD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Sync,
    Async,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ActiveHigh => "posedge",
            Self::ActiveLow => "negedge",
        })
    }
}

impl Polarity {
    /// Converts a pin level into the logical (asserted) level.
    pub fn bool(&self, b: bool) -> bool {
        match self {
            Self::ActiveHigh => b,
            Self::ActiveLow => !b,
        }
    }
}

pub trait ClockDomain: 'static {
    /// In hertz
    const FREQ: usize;
    /// In picoseconds
    const PERIOD: usize = hz_to_period(Self::FREQ);
    /// Async/Sync reset
    const RESET_KIND: SyncKind;
    /// Reset Polarity
    const RESET_POLARITY: Polarity;
}

#[derive_where(Debug, Clone, Copy, Default)]
pub struct Clock<D: ClockDomain> {
    _dom: PhantomData<D>,
}

impl<D: ClockDomain> Display for Clock<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clk@{}Hz", D::FREQ)
    }
}

impl<D: ClockDomain> Clock<D> {
    pub fn new() -> Self {
        Self { _dom: PhantomData }
    }

    #[inline]
    pub fn freq(&self) -> usize {
        D::FREQ
    }

    #[inline]
    pub fn period(&self) -> usize {
        D::PERIOD
    }
}

pub struct TestDomain<const N: usize>;

impl<const N: usize> ClockDomain for TestDomain<N> {
    const FREQ: usize = N;
    const RESET_KIND: SyncKind = SyncKind::Sync;
    const RESET_POLARITY: Polarity = Polarity::ActiveHigh;
}

pub type TD4 = TestDomain<4>;
/// One clock cycle per hundredth of a second.
pub type TD100 = TestDomain<100>;
pub type TD400 = TestDomain<400>;
