// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! State shared between the interrupt handlers and the main loop.
//!
//! There is no lock. Every field is a word-sized atomic (or an array of them) and has one
//! designated writer per transition:
//!
//! | Field | Set by | Cleared by | Read by |
//! | ----- | ------ | ---------- | ------- |
//! | `mode` | button | button | all |
//! | `mode_changed` | button | main loop | main loop |
//! | `awaiting` | main loop | receive, tick, button | all |
//! | `awaiting_prev` | tick | tick, button | tick |
//! | `send_due` | tick | main loop | main loop |
//! | `self_test_due` | tick | main loop | main loop |
//! | `ticks` | tick | never | all |
//! | receive assembly | receive (bytes), main loop (offset reset) | main loop | main loop |
//! | servo targets | main loop | never | servo output |
//!
//! Handlers run to completion and never nest, so at most one update per field is in flight when
//! another context reads it. The main loop resets the receive offset and raises `awaiting`
//! *before* it transmits a request; the receive handler can only clear `awaiting` after that.

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, AtomicU8, Ordering};

use crate::config::{Config, CHANNELS, PULSE_CENTER_US};
use crate::io::{pulse_in_range, Channel};
use crate::mode::Mode;
use crate::protocol::ReceiveAssembly;

#[allow(clippy::declare_interior_mutable_const)]
const CENTERED: AtomicU16 = AtomicU16::new(PULSE_CENTER_US);

/// Process-wide state. Create one in a `static` and hand `&SharedState` to every entry point.
pub struct SharedState {
    config: Config,

    mode: AtomicU8,
    mode_changed: AtomicBool,

    awaiting: AtomicBool,
    awaiting_prev: AtomicBool,

    send_due: AtomicBool,
    self_test_due: AtomicBool,
    ticks: AtomicU32,

    rx: ReceiveAssembly,
    targets: [AtomicU16; CHANNELS],
}

impl SharedState {
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            mode: AtomicU8::new(Mode::Configure.bits()),
            // Render the mode LEDs on the first pass of the main loop.
            mode_changed: AtomicBool::new(true),
            awaiting: AtomicBool::new(false),
            awaiting_prev: AtomicBool::new(false),
            send_due: AtomicBool::new(false),
            self_test_due: AtomicBool::new(false),
            ticks: AtomicU32::new(0),
            rx: ReceiveAssembly::new(),
            targets: [CENTERED; CHANNELS],
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ----- Mode -----

    #[inline]
    pub fn mode(&self) -> Mode {
        Mode::from_bits(self.mode.load(Ordering::Acquire))
    }

    /// Advance to the next mode and flag the change for the main loop.
    pub(crate) fn advance_mode(&self) -> Mode {
        let next = self.mode().next();
        self.mode.store(next.bits(), Ordering::Release);
        // A strike counted in an earlier Client stint must not carry into the next one.
        self.awaiting_prev.store(false, Ordering::Relaxed);
        self.mode_changed.store(true, Ordering::Release);
        next
    }

    /// Consume the "mode changed" flag.
    pub(crate) fn take_mode_changed(&self) -> bool {
        self.mode_changed.swap(false, Ordering::AcqRel)
    }

    // ----- Exchange bookkeeping -----

    /// A request is out and its reply has not fully arrived yet.
    #[inline]
    pub fn awaiting_response(&self) -> bool {
        self.awaiting.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn set_awaiting(&self, awaiting: bool) {
        self.awaiting.store(awaiting, Ordering::Release);
    }

    /// Two-strikes timeout, run once per tick.
    ///
    /// Clears `awaiting` if it was already set at the previous tick. Returns `true` if it did.
    pub(crate) fn expire_stale_wait(&self) -> bool {
        let awaiting = self.awaiting.load(Ordering::Acquire);
        let expired = awaiting && self.awaiting_prev.load(Ordering::Relaxed);
        if expired {
            self.awaiting.store(false, Ordering::Release);
        }
        self.awaiting_prev
            .store(awaiting && !expired, Ordering::Relaxed);
        expired
    }

    #[inline]
    pub(crate) fn arm_send(&self) {
        self.send_due.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn take_send_due(&self) -> bool {
        self.send_due.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub fn send_due(&self) -> bool {
        self.send_due.load(Ordering::Acquire)
    }

    // ----- Tick -----

    /// Monotonic count of scheduler ticks since boot.
    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Bump the tick counter, returning the value before the increment.
    pub(crate) fn advance_tick(&self) -> u32 {
        // Only the tick handler writes; plain load/store keeps this usable on thumbv6.
        let now = self.ticks.load(Ordering::Acquire);
        self.ticks.store(now.wrapping_add(1), Ordering::Release);
        now
    }

    #[inline]
    pub(crate) fn arm_self_test(&self) {
        self.self_test_due.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn take_self_test(&self) -> bool {
        self.self_test_due.swap(false, Ordering::AcqRel)
    }

    // ----- Receive assembly -----

    #[inline]
    pub fn receiver(&self) -> &ReceiveAssembly {
        &self.rx
    }

    // ----- Servo targets -----

    /// Last accepted pulse width for `channel`.
    #[inline]
    pub fn servo_target(&self, channel: Channel) -> u16 {
        self.targets[channel.index()].load(Ordering::Acquire)
    }

    /// Snapshot of all five targets, channel 1 first.
    pub fn servo_targets(&self) -> [u16; CHANNELS] {
        let mut out = [0; CHANNELS];
        for (dst, src) in out.iter_mut().zip(self.targets.iter()) {
            *dst = src.load(Ordering::Acquire);
        }
        out
    }

    /// Store `pulse_us` as the target of `channel` if it lies in the servo window.
    ///
    /// Out-of-range values leave the previous target in place and return `false`.
    pub(crate) fn set_servo_target(&self, channel: Channel, pulse_us: i32) -> bool {
        if pulse_us < 0 || !pulse_in_range(pulse_us as u32) {
            return false;
        }
        self.targets[channel.index()].store(pulse_us as u16, Ordering::Release);
        true
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(Config::DEFAULT)
    }
}
