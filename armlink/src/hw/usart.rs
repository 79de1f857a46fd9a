// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! [`Usart`] is the blocking transmit half and implements both [`ByteSink`] (raw protocol bytes)
//! and `core::fmt::Write` (console log lines). [`UsartRx`] is the receive half, drained from the
//! RXNE interrupt.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the console on the host machine, connect to the ST-LINK USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```

use core::fmt;
use nb::block;

use armlink_core::io::ByteSink;
use stm32f7xx_hal::{
    prelude::*,
    serial::{Event, Instance, Pins, Rx, Serial, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

pub struct UsartRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> Usart<U> {
    /// Enable the receive interrupt and split `serial` into its two halves.
    pub fn new<PINS: Pins<U>>(mut serial: Serial<U, PINS>) -> (Self, UsartRx<U>) {
        serial.listen(Event::Rxne);
        let (tx, rx) = serial.split();
        (Self { tx }, UsartRx { rx })
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }
}

impl<U: Instance> UsartRx<U> {
    /// Next received byte, or `None` once the data register is empty.
    ///
    /// Framing/overrun errors are cleared by the HAL and the byte is dropped.
    #[inline]
    pub fn read_byte(&mut self) -> Option<u8> {
        self.rx.read().ok()
    }
}

impl<U: Instance> ByteSink for Usart<U> {
    #[inline]
    fn send(&mut self, byte: u8) {
        self.write_byte(byte);
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}
