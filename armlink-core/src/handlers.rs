// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt-context entry points.
//!
//! The board wires these to its SysTick, USART receive and button interrupts. Each one runs to
//! completion, touches only atomics in [`SharedState`], and never blocks beyond the byte sends it
//! is handed.

use crate::io::{ByteSink, Indicators, Led};
use crate::mode::Mode;
use crate::state::SharedState;

/// Periodic scheduler tick (10 Hz).
///
/// - Every `heartbeat_period` ticks: toggle the heartbeat LED and request an ADC self-test.
/// - Client: arm a broadcast request every tick, and drop a wait that has seen no reply for two
///   consecutive ticks so the main loop can retry.
/// - Command: arm a forced resend every `resend_period` ticks, whether or not a reply arrived.
pub fn on_tick<I: Indicators>(state: &SharedState, leds: &mut I) {
    let tick = state.advance_tick();
    let cfg = state.config();

    if tick % cfg.heartbeat_period.max(1) == 0 {
        leds.toggle(Led::Heartbeat);
        state.arm_self_test();
    }

    match state.mode() {
        Mode::Configure => {}
        Mode::Client => {
            state.arm_send();
            state.expire_stale_wait();
        }
        Mode::Command => {
            if tick % cfg.resend_period.max(1) == 0 {
                state.arm_send();
            }
        }
    }
}

/// A byte arrived from the peer link.
///
/// In `Configure` it is forwarded raw to the console. Otherwise it is appended to the receive
/// assembly; the byte that completes a response also ends the pending exchange.
pub fn on_link_byte<C: ByteSink>(state: &SharedState, byte: u8, console: &mut C) {
    if !state.mode().frames_link() {
        console.send(byte);
        return;
    }

    if state.receiver().push(byte) {
        state.set_awaiting(false);
    }
}

/// A byte arrived from the operator console.
///
/// In `Configure` it goes straight to the peer link (manual radio provisioning); otherwise it is
/// echoed back.
pub fn on_console_byte<L: ByteSink, C: ByteSink>(
    state: &SharedState,
    byte: u8,
    link: &mut L,
    console: &mut C,
) {
    match state.mode() {
        Mode::Configure => link.send(byte),
        Mode::Client | Mode::Command => console.send(byte),
    }
}

/// Debounced button edge: advance to the next mode.
///
/// Entering `Command` abandons any wait left over from `Client`.
pub fn on_external_edge(state: &SharedState) -> Mode {
    let mode = state.advance_mode();
    if mode == Mode::Command {
        state.set_awaiting(false);
    }
    mode
}
