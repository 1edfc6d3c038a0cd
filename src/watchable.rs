//! Formats for logging the values of watched signals.

use std::{
    borrow::Cow,
    fmt::{self, Binary, Debug, Display, LowerHex, UpperHex},
    rc::Rc,
};

use derive_where::derive_where;

use crate::signal::SignalValue;

pub trait FmtKind {}

/// A label and the formatting trait used to print a watched value.
#[derive_where(Debug, Clone)]
pub struct WatchFormat<T> {
    label: Rc<Cow<'static, str>>,
    #[derive_where(skip)]
    write: fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl<T> WatchFormat<T> {
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn show<'a>(&'a self, value: &'a T) -> Watched<'a, T> {
        Watched {
            format: self,
            value,
        }
    }
}

/// A value printed as `label: value`.
pub struct Watched<'a, T> {
    format: &'a WatchFormat<T>,
    value: &'a T,
}

impl<'a, T> Display for Watched<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.format.label)?;
        (self.format.write)(self.value, f)
    }
}

pub trait Watchable<F: FmtKind>: Sized {
    fn watch_format(label: impl Into<Cow<'static, str>>) -> WatchFormat<Self>;
}

macro_rules! fmt_kinds {
    ($( $kind:ident => $fmt:ident ),+) => {
        $(
            pub struct $kind;

            impl FmtKind for $kind {}

            impl<T: SignalValue + $fmt> Watchable<$kind> for T {
                fn watch_format(label: impl Into<Cow<'static, str>>) -> WatchFormat<T> {
                    WatchFormat {
                        label: Rc::new(label.into()),
                        write: <T as $fmt>::fmt,
                    }
                }
            }
        )+
    };
}

fmt_kinds!(
    AsDebug => Debug,
    AsDisplay => Display,
    AsBinary => Binary,
    AsLowerHex => LowerHex,
    AsUpperHex => UpperHex
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bcd::Bcd;

    #[test]
    fn shows_label() {
        let format = <Bcd as Watchable<AsDisplay>>::watch_format("digits");
        let value = Bcd::from_packed(0x0001_2345);

        assert_eq!(format.label(), "digits");
        assert_eq!(format.show(&value).to_string(), "digits: 00:01:23.45");
    }

    #[test]
    fn binary_and_hex() {
        let mask = <u8 as Watchable<AsBinary>>::watch_format("mask");
        let packed = <u32 as Watchable<AsUpperHex>>::watch_format("packed");

        assert_eq!(mask.show(&0b0001_0111).to_string(), "mask: 10111");
        assert_eq!(packed.show(&0x9959_5999).to_string(), "packed: 99595999");
    }
}
