// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! End-to-end behavior of the handlers and main loop against mock peripherals.

mod common;

use armlink_core::config::{BROADCAST_FILLER, BROADCAST_ID, PULSE_CENTER_US};
use armlink_core::handlers;
use armlink_core::protocol::messages::{Response, TYPE_PING};
use armlink_core::update::pulse_from_sample;
use armlink_core::{Config, Mode, SharedState};

use common::*;

const BROADCAST: (i32, i32) = (BROADCAST_ID, BROADCAST_FILLER);

#[test]
fn client_polls_once_per_timeout_when_peer_is_silent() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);
    enter(&state, &mut drv, Mode::Client);
    assert!(drv.link().bytes.is_empty());

    // Tick 0: first request goes out.
    tick(&state);
    drv.step();
    assert_eq!(drv.link().requests(), [BROADCAST]);
    assert!(state.awaiting_response());

    // Tick 1: still waiting, nothing new is sent.
    tick(&state);
    drv.step();
    assert_eq!(drv.link().requests().len(), 1);
    assert!(state.awaiting_response());

    // Tick 2: second silent tick drops the wait, the main loop retries.
    tick(&state);
    assert!(!state.awaiting_response());
    drv.step();
    assert_eq!(drv.link().requests().len(), 2);
    assert!(state.awaiting_response());

    for _ in 3..10 {
        tick(&state);
        drv.step();
    }
    assert_eq!(state.ticks(), 10);
    assert_eq!(drv.link().requests(), [BROADCAST; 5]);
}

#[test]
fn client_wait_gets_two_fresh_ticks_after_a_mode_cycle() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);
    enter(&state, &mut drv, Mode::Client);

    // One silent Client tick leaves the first strike counted.
    tick(&state);
    drv.step();
    tick(&state);
    drv.step();
    assert!(state.awaiting_response());

    // Command sends its own request, Configure leaves it pending.
    enter(&state, &mut drv, Mode::Command);
    enter(&state, &mut drv, Mode::Client);
    assert!(state.awaiting_response());
    let sent = drv.link().requests().len();

    tick(&state);
    drv.step();
    assert!(state.awaiting_response());
    assert_eq!(drv.link().requests().len(), sent);

    tick(&state);
    assert!(!state.awaiting_response());
    drv.step();
    assert_eq!(drv.link().requests().len(), sent + 1);
}

#[test]
fn client_reply_unblocks_without_waiting_for_timeout() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);
    enter(&state, &mut drv, Mode::Client);

    tick(&state);
    drv.step();
    assert!(state.awaiting_response());

    deliver(&state, &Response::new(BROADCAST_ID, 0, [1500; 30]));
    assert!(!state.awaiting_response());
    drv.step();

    // The very next tick sends again.
    tick(&state);
    drv.step();
    assert_eq!(drv.link().requests().len(), 2);
}

#[test]
fn client_applies_values_one_to_five_within_window() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);
    enter(&state, &mut drv, Mode::Client);

    let mut values = [0; 30];
    values[0] = 1111; // not a joint
    values[1] = 1200;
    values[2] = 999;
    values[3] = 2000;
    values[4] = 2500;
    values[5] = 1000;
    values[6] = 1700; // not a joint

    deliver(&state, &Response::new(BROADCAST_ID, 1500, values));
    drv.step();

    assert_eq!(drv.servos().writes, [(1, 1200), (3, 2000), (5, 1000)]);
    assert_eq!(
        state.servo_targets(),
        [1200, PULSE_CENTER_US, 2000, PULSE_CENTER_US, 1000]
    );
}

#[test]
fn client_ignores_response_with_foreign_type() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);
    enter(&state, &mut drv, Mode::Client);

    let foreign = Response {
        tag: TYPE_PING,
        ..Response::new(BROADCAST_ID, 0, [1800; 30])
    };
    deliver(&state, &foreign);
    drv.step();

    assert!(drv.servos().writes.is_empty());
    assert!(!state.receiver().is_complete());
}

#[test]
fn command_reports_each_channel_from_one_snapshot() {
    let first = [0, 1024, 2048, 3072, 4095];
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, first);

    // Entering Command sends straight away, starting a fresh round.
    enter(&state, &mut drv, Mode::Command);
    for _ in 0..4 {
        deliver(&state, &Response::new(0, 0, [0; 30]));
        drv.step();
    }

    let expected: Vec<(i32, i32)> = (1..=5)
        .zip(first)
        .map(|(id, sample)| (id, pulse_from_sample(sample)))
        .collect();
    assert_eq!(drv.link().requests(), expected);
    assert_eq!(
        expected.iter().map(|r| r.1).collect::<Vec<_>>(),
        [1000, 1250, 1500, 1750, 2000]
    );
    assert_eq!(drv.adc_mut().reads, 1);

    // Sixth send takes a new snapshot and restarts at id 1.
    drv.adc_mut().next = [4095, 0, 0, 0, 0];
    drv.link_mut().clear();
    deliver(&state, &Response::new(0, 0, [0; 30]));
    drv.step();

    assert_eq!(drv.link().requests(), [(1, 2000)]);
    assert_eq!(drv.adc_mut().reads, 2);
    assert_eq!(drv.cursor(), 2);
    assert_eq!(drv.samples(), &[4095, 0, 0, 0, 0]);
}

#[test]
fn command_forces_a_resend_once_per_second() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [2048; 5]);
    enter(&state, &mut drv, Mode::Command);
    assert_eq!(drv.link().requests().len(), 1);

    // No reply: the loop sits on the pending exchange.
    for _ in 0..3 {
        drv.step();
    }
    assert_eq!(drv.link().requests().len(), 1);

    // Tick 0 forces the next channel out anyway.
    tick(&state);
    drv.step();
    assert_eq!(drv.link().requests().len(), 2);

    for _ in 1..10 {
        tick(&state);
        drv.step();
    }
    assert_eq!(drv.link().requests().len(), 2);

    tick(&state);
    drv.step();
    let ids: Vec<i32> = drv.link().requests().iter().map(|r| r.0).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[test]
fn command_logs_responses_without_moving_servos() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);
    enter(&state, &mut drv, Mode::Command);

    deliver(&state, &Response::new(3, 1421, [1500; 30]));
    drv.step();

    assert!(drv.log().contains("[UPDATE,id=3,average=1421]\r\n"));
    assert!(drv.servos().writes.is_empty());
}

#[test]
fn mode_leds_follow_the_button() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);

    drv.step();
    assert!(drv.leds().primary && !drv.leds().secondary);

    enter(&state, &mut drv, Mode::Client);
    assert!(!drv.leds().primary && drv.leds().secondary);

    enter(&state, &mut drv, Mode::Command);
    assert!(drv.leds().primary && drv.leds().secondary);

    handlers::on_external_edge(&state);
    drv.step();
    assert_eq!(state.mode(), Mode::Configure);
    assert!(drv.leds().primary && !drv.leds().secondary);
    assert!(drv.log().contains("mode: Client\r\n"));
}

#[test]
fn mode_change_restarts_receive_assembly() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);
    enter(&state, &mut drv, Mode::Client);

    let mut console = Wire::default();
    for b in 0..10u8 {
        handlers::on_link_byte(&state, b, &mut console);
    }
    assert_eq!(state.receiver().offset(), 10);

    handlers::on_external_edge(&state);
    drv.step();
    assert_eq!(state.receiver().offset(), 0);
}

#[test]
fn configure_mode_stays_off_the_link() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [0; 5]);

    for _ in 0..20 {
        tick(&state);
        drv.step();
    }
    assert!(drv.link().bytes.is_empty());
    assert_eq!(drv.adc_mut().reads, 0);
}

#[test]
fn self_test_prints_a_snapshot_when_enabled() {
    let state = SharedState::new(Config {
        adc_self_test: true,
        ..Config::DEFAULT
    });
    let mut drv = driver(&state, [1, 22, 333, 4000, 4095]);

    tick(&state);
    drv.step();

    let log = drv.log();
    assert!(log.contains("1\r\n22\r\n333\r\n4000\r\n4095\r\n-----------\r\n"));
    assert_eq!(drv.adc_mut().reads, 1);
}

#[test]
fn self_test_is_silent_by_default() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [7; 5]);

    tick(&state);
    drv.step();

    assert!(!drv.log().contains("-----------"));
    assert_eq!(drv.adc_mut().reads, 0);
}

#[test]
fn adc_overrun_is_logged_and_sampling_continues() {
    let state = SharedState::new(Config::DEFAULT);
    let mut drv = driver(&state, [4095; 5]);
    drv.adc_mut().overrun = true;

    enter(&state, &mut drv, Mode::Command);

    assert!(drv.log().contains("ADC overrun\r\n"));
    assert_eq!(drv.link().requests(), [(1, 2000)]);
}
