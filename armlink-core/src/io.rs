// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board-facing traits.
//!
//! The protocol core never touches registers. The firmware implements these over its `hw`
//! wrappers; tests implement them over plain arrays and vectors.

use core::fmt;

use crate::config::{CHANNELS, PULSE_MAX_US, PULSE_MIN_US};

/// One of the five joints, numbered `1..=5`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    /// Returns `None` outside `1..=5`.
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n as usize <= CHANNELS {
            Some(Self(n))
        } else {
            None
        }
    }

    /// All channels in order.
    pub fn all() -> impl Iterator<Item = Channel> {
        (1..=CHANNELS as u8).map(Channel)
    }

    /// 1-based channel number (also the request id reported for it).
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based position in sample and target arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

/// Whether `pulse_us` lies in the accepted servo window.
#[inline]
pub const fn pulse_in_range(pulse_us: u32) -> bool {
    pulse_us >= PULSE_MIN_US as u32 && pulse_us <= PULSE_MAX_US as u32
}

/// Errors reported by an [`AnalogInput`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdcError {
    /// A conversion finished before the previous result was read. The buffer is still filled.
    Overrun,
}

/// Reads all potentiometers in one pass.
pub trait AnalogInput {
    /// Fill `out` with 12-bit samples, channel 1 first.
    fn read(&mut self, out: &mut [u16; CHANNELS]) -> Result<(), AdcError>;
}

/// Drives the servo PWM outputs.
pub trait ServoOutput {
    /// Set the high time of `channel` in microseconds.
    fn set_pulse(&mut self, channel: Channel, pulse_us: u16);
}

/// Blocking single-byte serial transmit.
pub trait ByteSink {
    fn send(&mut self, byte: u8);

    fn send_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.send(b);
        }
    }
}

/// `fmt::Write` over a [`ByteSink`], one [`ByteSink::send`] per byte.
///
/// Wrap a sink that takes a lock per `send` in this to log text without holding the lock for a
/// whole line.
pub struct ByteWriter<S>(pub S);

impl<S: ByteSink> fmt::Write for ByteWriter<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.send_all(s.as_bytes());
        Ok(())
    }
}

/// Status LEDs by role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Led {
    /// Blinks while the tick is running.
    Heartbeat,
    /// First mode LED.
    Primary,
    /// Second mode LED.
    Secondary,
}

pub trait Indicators {
    fn set(&mut self, led: Led, on: bool);
    fn toggle(&mut self, led: Led);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn channel_bounds() {
        assert!(Channel::new(0).is_none());
        assert!(Channel::new(6).is_none());

        let first = Channel::new(1).unwrap();
        assert_eq!(first.number(), 1);
        assert_eq!(first.index(), 0);

        let numbers: Vec<u8> = Channel::all().map(Channel::number).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn pulse_window_is_closed() {
        assert!(!pulse_in_range(999));
        assert!(pulse_in_range(1000));
        assert!(pulse_in_range(1500));
        assert!(pulse_in_range(2000));
        assert!(!pulse_in_range(2001));
    }

    /// Records every `send` call separately.
    #[derive(Default)]
    struct Calls(Vec<Vec<u8>>);

    impl ByteSink for Calls {
        fn send(&mut self, byte: u8) {
            self.0.push(vec![byte]);
        }
    }

    #[test]
    fn text_goes_out_one_send_per_byte() {
        let mut out = ByteWriter(Calls::default());
        write!(out, "[UPDATE,id={}]\r", 3).unwrap();

        let calls = out.0 .0;
        assert_eq!(calls.len(), "[UPDATE,id=3]\r".len());
        assert!(calls.iter().all(|c| c.len() == 1));
        assert_eq!(calls.concat(), b"[UPDATE,id=3]\r");
    }
}
