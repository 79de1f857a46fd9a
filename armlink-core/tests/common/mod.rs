// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! In-memory stand-ins for the board peripherals.

#![allow(dead_code)]

use armlink_core::config::CHANNELS;
use armlink_core::handlers;
use armlink_core::io::{AdcError, AnalogInput, ByteSink, Channel, Indicators, Led, ServoOutput};
use armlink_core::protocol::messages::{Message, MessageKind, Response, REQUEST_LEN};
use armlink_core::{Driver, SharedState};

pub struct MockAdc {
    pub next: [u16; CHANNELS],
    pub reads: usize,
    pub overrun: bool,
}

impl MockAdc {
    pub fn new(next: [u16; CHANNELS]) -> Self {
        Self {
            next,
            reads: 0,
            overrun: false,
        }
    }
}

impl AnalogInput for MockAdc {
    fn read(&mut self, out: &mut [u16; CHANNELS]) -> Result<(), AdcError> {
        *out = self.next;
        self.reads += 1;
        if self.overrun {
            Err(AdcError::Overrun)
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct MockServos {
    pub writes: Vec<(u8, u16)>,
}

impl ServoOutput for MockServos {
    fn set_pulse(&mut self, channel: Channel, pulse_us: u16) {
        self.writes.push((channel.number(), pulse_us));
    }
}

#[derive(Default)]
pub struct Wire {
    pub bytes: Vec<u8>,
}

impl Wire {
    /// Decode everything sent so far as `(id, value)` update requests.
    pub fn requests(&self) -> Vec<(i32, i32)> {
        assert_eq!(self.bytes.len() % REQUEST_LEN, 0, "partial request on the wire");
        self.bytes
            .chunks(REQUEST_LEN)
            .map(|chunk| match Message::decode(chunk, MessageKind::UpdateRequest) {
                Ok(Message::UpdateRequest { id, value }) => (id, value),
                other => panic!("not a request: {:?}", other),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl ByteSink for Wire {
    fn send(&mut self, byte: u8) {
        self.bytes.push(byte);
    }
}

#[derive(Default)]
pub struct MockLeds {
    pub heartbeat: bool,
    pub primary: bool,
    pub secondary: bool,
}

impl MockLeds {
    fn slot(&mut self, led: Led) -> &mut bool {
        match led {
            Led::Heartbeat => &mut self.heartbeat,
            Led::Primary => &mut self.primary,
            Led::Secondary => &mut self.secondary,
        }
    }
}

impl Indicators for MockLeds {
    fn set(&mut self, led: Led, on: bool) {
        *self.slot(led) = on;
    }

    fn toggle(&mut self, led: Led) {
        let slot = self.slot(led);
        *slot = !*slot;
    }
}

pub type TestDriver<'a> = Driver<'a, MockAdc, MockServos, Wire, MockLeds, String>;

pub fn driver(state: &SharedState, samples: [u16; CHANNELS]) -> TestDriver<'_> {
    Driver::new(
        state,
        MockAdc::new(samples),
        MockServos::default(),
        Wire::default(),
        MockLeds::default(),
        String::new(),
    )
}

/// Press the button until `state` is in `mode`, letting the main loop see each change.
pub fn enter(state: &SharedState, drv: &mut TestDriver<'_>, mode: armlink_core::Mode) {
    while state.mode() != mode {
        handlers::on_external_edge(state);
        drv.step();
    }
}

/// Feed a whole response through the link receive handler.
pub fn deliver(state: &SharedState, response: &Response) {
    let mut console = Wire::default();
    for &b in Message::UpdateResponse(*response).encode().iter() {
        handlers::on_link_byte(state, b, &mut console);
    }
}

pub fn tick(state: &SharedState) {
    let mut leds = MockLeds::default();
    handlers::on_tick(state, &mut leds);
}
