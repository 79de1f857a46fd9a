// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # ArmLink Core
//!
//! Hardware-independent protocol and state core of the ArmLink remote-control node: five
//! potentiometers in, five servo channels out, and fixed-size binary messages exchanged with a
//! peer over a serial link.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Wire messages and the byte-at-a-time receive assembly |
//! | [`mode`] | Operator-driven Configure / Client / Command mode cycle |
//! | [`state`] | Lock-free state shared between interrupt handlers and the main loop |
//! | [`handlers`] | Tick, byte-received and button entry points |
//! | [`update`] | Main-loop driver: request scheduling and response application |
//! | [`io`] | Traits the board implements (ADC, servos, serial, LEDs) |
//! | [`config`] | Timing constants and runtime configuration |
//!
//! ## Execution model
//!
//! The board calls [`handlers::on_tick`], [`handlers::on_link_byte`],
//! [`handlers::on_console_byte`] and [`handlers::on_external_edge`] from its interrupt handlers,
//! and [`update::Driver::step`] from a plain `loop {}`. Nothing here blocks, so the same calls
//! can be driven directly from host tests.
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod handlers;
pub mod io;
pub mod mode;
pub mod protocol;
pub mod state;
pub mod update;

pub use config::Config;
pub use mode::Mode;
pub use state::SharedState;
pub use update::Driver;
