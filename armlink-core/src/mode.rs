// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator mode state machine.
//!
//! The user button advances `Configure -> Client -> Command -> Configure`. There is no terminal
//! state.
//!
//! - `Configure`: serial passthrough between console and peer link, used to provision the radio
//!   module by hand. Nothing is parsed.
//! - `Client`: poll the peer for servo targets and drive the servos from the reply.
//! - `Command`: report the potentiometers to the peer one channel at a time.

/// Operating mode of the node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    #[default]
    Configure = 0,
    Client = 1,
    Command = 2,
}

impl Mode {
    /// Mode entered on the next button press.
    pub const fn next(self) -> Self {
        match self {
            Mode::Configure => Mode::Client,
            Mode::Client => Mode::Command,
            Mode::Command => Mode::Configure,
        }
    }

    /// Decode the value stored in [`crate::state::SharedState`].
    ///
    /// Unknown values fall back to `Configure`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Mode::Client,
            2 => Mode::Command,
            _ => Mode::Configure,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// LED pattern `(primary, secondary)` shown while in this mode.
    pub const fn indicator(self) -> (bool, bool) {
        match self {
            Mode::Configure => (true, false),
            Mode::Client => (false, true),
            Mode::Command => (true, true),
        }
    }

    /// Whether bytes from the peer link are framed into messages.
    #[inline]
    pub const fn frames_link(self) -> bool {
        !matches!(self, Mode::Configure)
    }
}
