use super::{
    reg::{reg0, Reset},
    Signal,
};
use crate::domain::{clk_divider, hz_to_period, Clock, ClockDomain};

/// A pulse that is high for one cycle out of every `n`.
pub fn rise_every<D: ClockDomain>(
    clk: &Clock<D>,
    rst: &Reset<D>,
    n: usize,
) -> Signal<D, bool> {
    let max = n.max(1) - 1;
    reg0(clk, rst, move |(idx, _): (usize, bool)| {
        let is_max = idx == max;
        (if is_max { 0 } else { idx + 1 }, is_max)
    })
    .map(|(_, en)| en)
}

/// A pulse every `ps` picoseconds of the domain `D`.
pub fn rise_period<D: ClockDomain>(
    clk: &Clock<D>,
    rst: &Reset<D>,
    ps: usize,
) -> Signal<D, bool> {
    rise_every(clk, rst, clk_divider::<D>(ps))
}

/// A pulse at `rate` hertz.
pub fn rise_rate<D: ClockDomain>(
    clk: &Clock<D>,
    rst: &Reset<D>,
    rate: usize,
) -> Signal<D, bool> {
    rise_period(clk, rst, hz_to_period(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::TD4, simulation::Simulate};

    #[test]
    fn every_n_cycles() {
        let clk = Clock::<TD4>::new();
        let s = rise_every(&clk, &Reset::reset(), 3);

        assert_eq!(s.simulate().take(8).collect::<Vec<_>>(), [
            false, false, false, true, false, false, true, false
        ]);
    }

    #[test]
    fn every_cycle() {
        let clk = Clock::<TD4>::new();
        let s = rise_every(&clk, &Reset::reset(), 1);

        assert_eq!(s.simulate().take(4).collect::<Vec<_>>(), [
            false, true, true, true
        ]);
    }

    #[test]
    fn rate() {
        let clk = Clock::<TD4>::new();
        let s = rise_rate(&clk, &Reset::reset(), 2);

        assert_eq!(s.simulate().take(5).collect::<Vec<_>>(), [
            false, false, true, false, true
        ]);
    }
}
