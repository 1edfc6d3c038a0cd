//! Packed decimal time value of the stopwatch.
//!
//! Eight 4-bit digits are packed into a `u32`. Digit 0 is the least
//! significant one (hundredths of a second), digit 7 is the tens of hours:
//!
//! ```text
//!  7  6   5  4   3  2   1  0
//!  H  H : M  M : S  S . c  c
//! ```

use std::{
    fmt::{self, Binary, Display, LowerHex, UpperHex},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signal::SignalValue;

pub const DIGITS: usize = 8;
pub const DIGIT_WIDTH: usize = 4;

const DIGIT_MASK: u32 = 0xf;

/// Centiseconds in the full range 00:00:00.00 ..= 99:59:59.99.
pub const CENTISECONDS_RANGE: u32 = 100 * 60 * 60 * 100;

/// Weight of every digit position in centiseconds.
const WEIGHTS: [u32; DIGITS] = [1, 10, 100, 1_000, 6_000, 60_000, 360_000, 3_600_000];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bcd(u32);

impl SignalValue for Bcd {}

impl Bcd {
    pub const ZERO: Self = Self(0);

    /// Per-position maxima: 99:59:59.99.
    pub const MAX: Self = Self(0x9959_5999);

    #[inline]
    pub const fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    #[inline]
    pub const fn packed(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn digit(&self, idx: usize) -> u8 {
        assert!(idx < DIGITS);
        ((self.0 >> (idx * DIGIT_WIDTH)) & DIGIT_MASK) as u8
    }

    #[must_use]
    pub const fn with_digit(self, idx: usize, digit: u8) -> Self {
        assert!(idx < DIGITS);
        let shift = idx * DIGIT_WIDTH;
        Self((self.0 & !(DIGIT_MASK << shift)) | (((digit as u32) & DIGIT_MASK) << shift))
    }

    pub fn digits(&self) -> [u8; DIGITS] {
        std::array::from_fn(|idx| self.digit(idx))
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Position of the most significant non-zero digit.
    pub fn highest_nonzero(&self) -> Option<usize> {
        (!self.is_zero()).then(|| DIGITS - 1 - (self.0.leading_zeros() as usize) / DIGIT_WIDTH)
    }

    /// Adds one at digit 0 and propagates the carry.
    ///
    /// A digit equal to its maximum in `max` wraps to 0 and carries into the
    /// next digit; any other digit is incremented modulo 16. The carry out of
    /// the last digit is dropped.
    #[must_use]
    pub fn incr_within(self, max: Bcd) -> Self {
        let mut res = self;
        for idx in 0..DIGITS {
            let digit = self.digit(idx);
            if digit == max.digit(idx) {
                res = res.with_digit(idx, 0);
            } else {
                return res.with_digit(idx, digit.wrapping_add(1));
            }
        }

        res
    }

    /// Converts elapsed centiseconds, wrapping after 99:59:59.99.
    pub fn from_centiseconds(cs: u32) -> Self {
        let mut rest = cs % CENTISECONDS_RANGE;
        let mut res = Self::ZERO;
        for idx in (0..DIGITS).rev() {
            let digit = rest / WEIGHTS[idx];
            rest %= WEIGHTS[idx];
            res = res.with_digit(idx, digit as u8);
        }

        res
    }

    /// Returns `None` if some digit lies above its positional maximum.
    pub fn to_centiseconds(&self) -> Option<u32> {
        (0..DIGITS).try_fold(0, |acc, idx| {
            let digit = self.digit(idx);
            (digit <= Self::MAX.digit(idx)).then(|| acc + digit as u32 * WEIGHTS[idx])
        })
    }

    pub fn is_valid(&self) -> bool {
        self.to_centiseconds().is_some()
    }
}

impl From<u32> for Bcd {
    fn from(packed: u32) -> Self {
        Self(packed)
    }
}

impl From<Bcd> for u32 {
    fn from(bcd: Bcd) -> Self {
        bcd.0
    }
}

impl Display for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.digits();
        write!(
            f,
            "{:x}{:x}:{:x}{:x}:{:x}{:x}.{:x}{:x}",
            d[7], d[6], d[5], d[4], d[3], d[2], d[1], d[0]
        )
    }
}

impl Binary for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Binary::fmt(&self.0, f)
    }
}

impl LowerHex for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        LowerHex::fmt(&self.0, f)
    }
}

impl UpperHex for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        UpperHex::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBcdError {
    #[error("empty time value")]
    Empty,
    #[error("invalid digit '{0}'")]
    InvalidDigit(char),
    #[error("field '{field}' must have {expected} digits")]
    FieldWidth { field: String, expected: usize },
    #[error("field '{field}' exceeds {max}")]
    OutOfRange { field: String, max: u32 },
    #[error("too many fields in '{0}' (expected at most HH:MM:SS.cc)")]
    TooManyFields(String),
    #[error("packed value '{0}' has more than 8 hex digits")]
    PackedTooWide(String),
}

fn parse_field(field: &str, max: u32, max_width: usize) -> Result<u32, ParseBcdError> {
    if field.is_empty() || field.len() > max_width {
        return Err(ParseBcdError::FieldWidth {
            field: field.to_string(),
            expected: max_width,
        });
    }

    let value = field.chars().try_fold(0, |acc, c| {
        c.to_digit(10)
            .map(|d| acc * 10 + d)
            .ok_or(ParseBcdError::InvalidDigit(c))
    })?;

    if value > max {
        return Err(ParseBcdError::OutOfRange {
            field: field.to_string(),
            max,
        });
    }

    Ok(value)
}

impl FromStr for Bcd {
    type Err = ParseBcdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseBcdError::Empty);
        }

        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if hex.is_empty() {
                return Err(ParseBcdError::Empty);
            }
            if hex.len() > DIGITS {
                return Err(ParseBcdError::PackedTooWide(s.to_string()));
            }
            let packed = hex.chars().try_fold(0, |acc, c| {
                c.to_digit(16)
                    .map(|d| (acc << DIGIT_WIDTH) | d)
                    .ok_or(ParseBcdError::InvalidDigit(c))
            })?;
            return Ok(Self(packed));
        }

        let (whole, cs) = match s.split_once('.') {
            // A single fractional digit is tenths of a second.
            Some((whole, cs)) if cs.len() == 1 => (whole, parse_field(cs, 9, 1)? * 10),
            Some((whole, cs)) => (whole, parse_field(cs, 99, 2)?),
            None => (s, 0),
        };

        let fields = whole.split(':').collect::<Vec<_>>();
        let (h, m, sec) = match fields.as_slice() {
            [sec] => (0, 0, parse_field(sec, 59, 2)?),
            [m, sec] => (0, parse_field(m, 59, 2)?, parse_field(sec, 59, 2)?),
            [h, m, sec] => (
                parse_field(h, 99, 2)?,
                parse_field(m, 59, 2)?,
                parse_field(sec, 59, 2)?,
            ),
            _ => return Err(ParseBcdError::TooManyFields(s.to_string())),
        };

        Ok(Self::from_centiseconds(((h * 60 + m) * 60 + sec) * 100 + cs))
    }
}

impl TryFrom<String> for Bcd {
    type Error = ParseBcdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Bcd> for String {
    fn from(bcd: Bcd) -> Self {
        if bcd.is_valid() {
            bcd.to_string()
        } else {
            format!("{:#010x}", bcd.0)
        }
    }
}
