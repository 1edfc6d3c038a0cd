use std::fmt::{self, Display};

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{domain::Polarity, signal::SignalValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    Dp,
}

impl Segment {
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

// gfedcba
const GLYPHS: [u8; 16] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
    0b111_0111, // A
    0b111_1100, // b
    0b011_1001, // C
    0b101_1110, // d
    0b111_1001, // E
    0b111_0001, // F
];

/// Lit segments of one display position, bit `i` is `Segment` `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Segments(u8);

impl SignalValue for Segments {}

impl Segments {
    pub const fn blank() -> Self {
        Self(0)
    }

    /// Glyph of a 4-bit digit, hex digits included.
    pub const fn encode(nibble: u8) -> Self {
        Self(GLYPHS[(nibble & 0xf) as usize])
    }

    #[must_use]
    pub const fn with_point(self, point: bool) -> Self {
        if point {
            Self(self.0 | Segment::Dp.bit())
        } else {
            Self(self.0 & !Segment::Dp.bit())
        }
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_lit(&self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    pub fn lit(&self) -> impl Iterator<Item = Segment> + '_ {
        Segment::iter().filter(|segment| self.is_lit(*segment))
    }

    /// Pin levels for the display: common cathode displays light a segment
    /// with a high level, common anode ones with a low level.
    pub fn to_pins(&self, polarity: Polarity) -> u8 {
        match polarity {
            Polarity::ActiveHigh => self.0,
            Polarity::ActiveLow => !self.0,
        }
    }
}

impl Display for Segments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in self.lit() {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            f.write_str(segment.into())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits() {
        assert_eq!(Segments::encode(0).to_string(), "a,b,c,d,e,f");
        assert_eq!(Segments::encode(1).to_string(), "b,c");
        assert_eq!(Segments::encode(8).lit().count(), 7);
        assert_eq!(Segments::encode(0xb).to_string(), "c,d,e,f,g");
    }

    #[test]
    fn decimal_point() {
        let seg = Segments::encode(7).with_point(true);

        assert!(seg.is_lit(Segment::Dp));
        assert_eq!(seg.bits(), 0b1000_0111);
        assert_eq!(seg.with_point(false), Segments::encode(7));
    }

    #[test]
    fn pins() {
        let seg = Segments::encode(1);

        assert_eq!(seg.to_pins(Polarity::ActiveHigh), 0b0000_0110);
        assert_eq!(seg.to_pins(Polarity::ActiveLow), 0b1111_1001);
        assert_eq!(Segments::blank().to_pins(Polarity::ActiveLow), 0xff);
    }
}
