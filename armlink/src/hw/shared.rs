// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Peripherals shared between the main loop and interrupt handlers.
//!
//! Each one lives in a `static Mutex<RefCell<Option<T>>>` filled once at boot. [`Shared`] is a
//! copyable handle that borrows it inside a critical section per call. Multi-byte sends go one
//! byte per critical section, so the receive interrupts still run between bytes. Log text goes
//! through [`ByteWriter`](armlink_core::io::ByteWriter) for the same reason.

use core::cell::RefCell;

use armlink_core::io::{ByteSink, Indicators, Led};
use cortex_m::interrupt::{self, Mutex};

pub type Slot<T> = Mutex<RefCell<Option<T>>>;

pub struct Shared<T: 'static>(&'static Slot<T>);

impl<T: 'static> Shared<T> {
    pub const fn new(slot: &'static Slot<T>) -> Self {
        Self(slot)
    }

    /// Move `value` into the slot.
    pub fn install(&self, value: T) {
        interrupt::free(|cs| {
            self.0.borrow(cs).replace(Some(value));
        });
    }

    /// Run `f` on the peripheral. Returns `None` before [`Shared::install`].
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        interrupt::free(|cs| self.0.borrow(cs).borrow_mut().as_mut().map(f))
    }
}

impl<T: ByteSink + 'static> ByteSink for Shared<T> {
    fn send(&mut self, byte: u8) {
        self.with(|t| t.send(byte));
    }
}

impl<T: Indicators + 'static> Indicators for Shared<T> {
    fn set(&mut self, led: Led, on: bool) {
        self.with(|t| t.set(led, on));
    }

    fn toggle(&mut self, led: Led) {
        self.with(|t| t.toggle(led));
    }
}
