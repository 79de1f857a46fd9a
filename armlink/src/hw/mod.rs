// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Board Support
//!
//! MCU-level wrappers that implement the `armlink_core::io` traits.
//!
//! - [`adc`] - Potentiometer snapshots on ADC1.
//! - [`button`] - Debounced user button on EXTI13.
//! - [`led`] - Heartbeat and mode LEDs.
//! - [`pins`] - Nucleo-144 pin map.
//! - [`servo`] - 50 Hz servo PWM on TIM1/TIM8.
//! - [`shared`] - Critical-section handles for peripherals used from interrupts.
//! - [`usart`] - Console and peer-link serial ports.

pub mod adc;
pub mod button;
pub mod led;
pub mod pins;
pub mod servo;
pub mod shared;
pub mod usart;

pub use adc::Potentiometers;
pub use button::UserButton;
pub use led::{Led, StatusLeds};
pub use pins::BoardPins;
pub use servo::Servos;
pub use shared::{Shared, Slot};
pub use usart::{Usart, UsartRx};
