// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Main-loop update driver.
//!
//! [`Driver::step`] is called from the firmware's `loop {}`. Each pass it reacts to the flags
//! raised by the interrupt handlers:
//!
//! - a mode change re-renders the mode LEDs and restarts the receive assembly,
//! - Client: when a request is due and none is pending, ask the peer for servo targets,
//! - Command: when none is pending (or a forced resend is due), report the next potentiometer,
//! - a completed response is applied to the servos (Client) or logged (Command),
//! - an armed self-test prints one ADC snapshot, if enabled.
//!
//! Channel `n` (1..=5) is sampled from `samples[n - 1]`, reported with request id `n`, and read
//! back from response `values[n]`.

use core::fmt::Write;

// Host tests use std's inherent `f32::round`.
#[cfg(not(test))]
use micromath::F32Ext;

use crate::config::{
    ADC_FULL_SCALE, BROADCAST_FILLER, BROADCAST_ID, CHANNELS, PULSE_MAX_US, PULSE_MIN_US,
};
use crate::io::{AdcError, AnalogInput, ByteSink, Channel, Indicators, Led, ServoOutput};
use crate::mode::Mode;
use crate::protocol::{Message, Response};
use crate::state::SharedState;

/// Map a 12-bit potentiometer reading onto the 1000..=2000 µs servo window.
///
/// `pulse_us = round(sample / 4095 * 1000) + 1000`. Readings above full scale saturate.
pub fn pulse_from_sample(sample: u16) -> i32 {
    let span = (PULSE_MAX_US - PULSE_MIN_US) as f32;
    let frac = sample.min(ADC_FULL_SCALE) as f32 / ADC_FULL_SCALE as f32;
    (frac * span).round() as i32 + PULSE_MIN_US as i32
}

/// Owns the main-loop side of the protocol and the collaborators it drives.
pub struct Driver<'a, A, S, L, I, W> {
    state: &'a SharedState,
    adc: A,
    servos: S,
    link: L,
    leds: I,
    log: W,

    /// Next channel to report in Command mode. Past 5 means a new snapshot is needed.
    cursor: u8,
    samples: [u16; CHANNELS],
}

impl<'a, A, S, L, I, W> Driver<'a, A, S, L, I, W>
where
    A: AnalogInput,
    S: ServoOutput,
    L: ByteSink,
    I: Indicators,
    W: Write,
{
    pub fn new(state: &'a SharedState, adc: A, servos: S, link: L, leds: I, log: W) -> Self {
        Self {
            state,
            adc,
            servos,
            link,
            leds,
            log,
            cursor: CHANNELS as u8 + 1,
            samples: [0; CHANNELS],
        }
    }

    /// One pass of the main loop.
    pub fn step(&mut self) {
        let state = self.state;

        if state.take_mode_changed() {
            self.enter_mode(state.mode());
        }

        match state.mode() {
            Mode::Configure => {}
            Mode::Client => {
                if state.take_send_due() && !state.awaiting_response() {
                    self.request_broadcast();
                }
            }
            Mode::Command => {
                let forced = state.take_send_due();
                if forced || !state.awaiting_response() {
                    self.report_next_channel();
                }
            }
        }

        if let Some(response) = state.receiver().take() {
            self.handle_response(&response);
        }

        if state.take_self_test() && state.config().adc_self_test {
            self.self_test();
        }
    }

    fn enter_mode(&mut self, mode: Mode) {
        let (primary, secondary) = mode.indicator();
        self.leds.set(Led::Primary, primary);
        self.leds.set(Led::Secondary, secondary);

        self.state.receiver().reset();
        let _ = writeln!(self.log, "mode: {:?}\r", mode);
    }

    /// Raise the wait and rewind the receiver, then transmit.
    fn exchange(&mut self, msg: Message) {
        self.state.receiver().reset();
        self.state.set_awaiting(true);
        self.link.send_all(&msg.encode());
    }

    fn request_broadcast(&mut self) {
        self.exchange(Message::UpdateRequest {
            id: BROADCAST_ID,
            value: BROADCAST_FILLER,
        });
    }

    fn report_next_channel(&mut self) {
        if self.cursor as usize > CHANNELS {
            self.sample_all();
            self.cursor = 1;
        }

        if let Some(channel) = Channel::new(self.cursor) {
            let value = pulse_from_sample(self.samples[channel.index()]);
            self.exchange(Message::UpdateRequest {
                id: channel.number() as i32,
                value,
            });
        }
        self.cursor += 1;
    }

    fn sample_all(&mut self) {
        if let Err(AdcError::Overrun) = self.adc.read(&mut self.samples) {
            let _ = writeln!(self.log, "ADC overrun\r");
        }
    }

    fn handle_response(&mut self, response: &Response) {
        match self.state.mode() {
            Mode::Client => {
                if response.is_update() {
                    self.apply(response);
                }
            }
            Mode::Command => {
                let _ = writeln!(
                    self.log,
                    "[UPDATE,id={},average={}]\r",
                    response.id, response.average
                );
            }
            Mode::Configure => {}
        }
    }

    /// Push the response's targets to the servos. Out-of-window values are skipped.
    fn apply(&mut self, response: &Response) -> usize {
        let mut applied = 0;
        for channel in Channel::all() {
            let value = response.values[channel.number() as usize];
            if self.state.set_servo_target(channel, value) {
                self.servos
                    .set_pulse(channel, self.state.servo_target(channel));
                applied += 1;
            }
        }
        applied
    }

    fn self_test(&mut self) {
        let mut data = [0u16; CHANNELS];
        if let Err(AdcError::Overrun) = self.adc.read(&mut data) {
            let _ = writeln!(self.log, "ADC overrun\r");
        }
        for v in data {
            let _ = writeln!(self.log, "{}\r", v);
        }
        let _ = writeln!(self.log, "-----------\r");
    }

    // ----- Accessors -----

    /// Next channel Command mode will report (`6` until the first snapshot).
    #[inline]
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Snapshot Command mode is currently reporting from.
    #[inline]
    pub fn samples(&self) -> &[u16; CHANNELS] {
        &self.samples
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    pub fn servos(&self) -> &S {
        &self.servos
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn leds(&self) -> &I {
        &self.leds
    }

    pub fn log(&self) -> &W {
        &self.log
    }
}
