//! Digit blanking and decimal point selection for the eight-digit display.

use std::fmt::{self, Display};

use crate::{
    bcd::{Bcd, DIGITS},
    signal::SignalValue,
};

/// Positions 0..ALWAYS_ON are never blanked ("0.00").
pub const ALWAYS_ON: usize = 3;

/// Decimal points after the seconds, minutes and hours units.
pub const POINTS: [usize; 3] = [2, 4, 6];

/// Active-high enable bitmaps, bit `i` drives display position `i`
/// (position 0 is the rightmost digit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayMask {
    pub digits: u8,
    pub points: u8,
}

impl SignalValue for DisplayMask {}

impl DisplayMask {
    pub fn from_digits(value: Bcd) -> Self {
        let visible = value.highest_nonzero().map_or(ALWAYS_ON, |idx| (idx + 1).max(ALWAYS_ON));
        let digits = ((1_u16 << visible) - 1) as u8;
        let points = POINTS
            .into_iter()
            .filter(|pos| digits & (1 << pos) != 0)
            .fold(0, |points, pos| points | (1 << pos));

        Self { digits, points }
    }

    #[inline]
    pub fn is_digit_on(&self, pos: usize) -> bool {
        pos < DIGITS && self.digits & (1 << pos) != 0
    }

    #[inline]
    pub fn is_point_on(&self, pos: usize) -> bool {
        pos < DIGITS && self.points & (1 << pos) != 0
    }
}

impl Display for DisplayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "digits={:08b} points={:08b}", self.digits, self.points)
    }
}

/// Text rendering of what the display shows: blanked positions are spaces
/// and a lit decimal point follows its digit.
pub fn render(value: Bcd, mask: DisplayMask) -> String {
    let mut out = String::with_capacity(DIGITS + POINTS.len());
    for pos in (0..DIGITS).rev() {
        if mask.is_digit_on(pos) {
            out.push(char::from_digit(value.digit(pos) as u32, 16).unwrap_or('?'));
        } else {
            out.push(' ');
        }
        if mask.is_point_on(pos) {
            out.push('.');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(packed: u32) -> (u8, u8) {
        let mask = DisplayMask::from_digits(Bcd::from_packed(packed));
        (mask.digits, mask.points)
    }

    #[test]
    fn blanking_table() {
        assert_eq!(mask(0x0000_0000), (0b0000_0111, 0b0000_0100));
        assert_eq!(mask(0x0000_0001), (0b0000_0111, 0b0000_0100));
        assert_eq!(mask(0x0000_0900), (0b0000_0111, 0b0000_0100));
        assert_eq!(mask(0x0000_1000), (0b0000_1111, 0b0000_0100));
        assert_eq!(mask(0x0001_0000), (0b0001_1111, 0b0001_0100));
        assert_eq!(mask(0x0010_0000), (0b0011_1111, 0b0001_0100));
        assert_eq!(mask(0x0100_0000), (0b0111_1111, 0b0101_0100));
        assert_eq!(mask(0x1000_0000), (0b1111_1111, 0b0101_0100));
        assert_eq!(mask(0x9959_5999), (0b1111_1111, 0b0101_0100));
    }

    #[test]
    fn inner_zeros_stay_visible() {
        assert_eq!(mask(0x1000_0001), (0b1111_1111, 0b0101_0100));
        assert_eq!(mask(0x0001_0001), (0b0001_1111, 0b0001_0100));
    }

    #[test]
    fn render_value() {
        let render = |packed: u32| {
            let value = Bcd::from_packed(packed);
            render(value, DisplayMask::from_digits(value))
        };

        assert_eq!(render(0x0000_0000), "     0.00");
        assert_eq!(render(0x0000_1234), "    12.34");
        assert_eq!(render(0x0001_0203), "   1.02.03");
        assert_eq!(render(0x1234_5678), "12.34.56.78");
    }
}
