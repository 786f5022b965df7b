//! Interrupt-safe single-slot mailboxes
//!
//! Values wider than one byte cannot be read or written atomically on the
//! AVR core, so every access to a [`SharedCell`] happens inside a critical
//! section. Each cell has one producer (an interrupt handler or the main
//! loop) and one consumer.

use core::cell::Cell;
use critical_section::{CriticalSection, Mutex};

pub struct SharedCell<T> {
    inner: Mutex<Cell<T>>,
}

impl<T: Copy> SharedCell<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Cell::new(value)),
        }
    }

    #[inline]
    pub fn load(&self) -> T {
        critical_section::with(|cs| self.get(cs))
    }

    #[inline]
    pub fn store(&self, value: T) {
        critical_section::with(|cs| self.set(cs, value));
    }

    /// Swap in `value` and return the previous content in one step.
    #[inline]
    pub fn replace(&self, value: T) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).replace(value))
    }

    #[inline]
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            cell.set(f(cell.get()));
        });
    }

    /// Read inside a critical section the caller already holds.
    #[inline]
    pub fn get(&self, cs: CriticalSection<'_>) -> T {
        self.inner.borrow(cs).get()
    }

    #[inline]
    pub fn set(&self, cs: CriticalSection<'_>, value: T) {
        self.inner.borrow(cs).set(value);
    }
}

impl<T: Copy + Default> Default for SharedCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
