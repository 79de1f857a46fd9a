// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LEDs.
//!
//! [`Led`] remembers its active level and last state so it can be toggled from an interrupt
//! without reading the pin back. [`StatusLeds`] groups the three board LEDs by role for the
//! protocol core.

use armlink_core::io::{self, Indicators};
use embedded_hal::digital::v2::OutputPin;

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    // Unused on the Nucleo-144.
    #[allow(dead_code)]
    Low,
}

pub struct Led<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    is_on: bool,
}

impl<PIN: OutputPin> Led<PIN> {
    /// Wrap `pin`, starting OFF.
    pub fn new(pin: PIN, active: ActiveLevel) -> Self {
        let mut led = Self {
            pin,
            active,
            is_on: true,
        };
        led.set(false);
        led
    }

    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    /// Drive the LED logically ON (true) or OFF (false).
    pub fn set(&mut self, on: bool) {
        let high = on == (self.active == ActiveLevel::High);
        if high {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.is_on = on;
    }

    #[inline]
    pub fn toggle(&mut self) {
        self.set(!self.is_on);
    }
}

/// Heartbeat plus the two mode LEDs.
pub struct StatusLeds<H: OutputPin, P: OutputPin, S: OutputPin> {
    pub heartbeat: Led<H>,
    pub primary: Led<P>,
    pub secondary: Led<S>,
}

impl<H: OutputPin, P: OutputPin, S: OutputPin> Indicators for StatusLeds<H, P, S> {
    fn set(&mut self, led: io::Led, on: bool) {
        match led {
            io::Led::Heartbeat => self.heartbeat.set(on),
            io::Led::Primary => self.primary.set(on),
            io::Led::Secondary => self.secondary.set(on),
        }
    }

    fn toggle(&mut self, led: io::Led) {
        match led {
            io::Led::Heartbeat => self.heartbeat.toggle(),
            io::Led::Primary => self.primary.toggle(),
            io::Led::Secondary => self.secondary.toggle(),
        }
    }
}
