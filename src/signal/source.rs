use std::{cell::RefCell, rc::Rc};

use super::SignalValue;

/// The writable end of an input created with [`Signal::source`]. Clones drive
/// the same input; a new value is seen from the next evaluated cycle on.
///
/// [`Signal::source`]: super::Signal::source
#[derive(Debug, Clone)]
pub struct Source<T: SignalValue> {
    cell: Rc<RefCell<T>>,
}

impl<T: SignalValue> Source<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    pub fn value(&self) -> T {
        self.cell.borrow().clone()
    }

    /// Returns the previous value.
    pub fn set_value(&self, value: T) -> T {
        self.cell.replace(value)
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.cell.borrow_mut());
    }
}

impl Source<bool> {
    pub fn revert(&self) {
        self.update(|level| *level = !*level);
    }

    /// Holds the input high while `f` runs, then releases it.
    pub fn press<R>(&self, f: impl FnOnce() -> R) -> R {
        self.set_value(true);
        let res = f();
        self.set_value(false);
        res
    }
}
