// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Timing constants and runtime configuration.

/// Number of potentiometer inputs and servo outputs.
pub const CHANNELS: usize = 5;

/// SysTick rate driving [`crate::handlers::on_tick`].
pub const TICK_HZ: u32 = 10;

/// Full-scale reading of the 12-bit ADC.
pub const ADC_FULL_SCALE: u16 = 0x0FFF;

/// Shortest accepted servo pulse, in microseconds.
pub const PULSE_MIN_US: u16 = 1000;
/// Longest accepted servo pulse, in microseconds.
pub const PULSE_MAX_US: u16 = 2000;
/// Servo pulse at power-up.
pub const PULSE_CENTER_US: u16 = 1500;

/// Request id meaning "no specific joint".
pub const BROADCAST_ID: i32 = 18;

/// Value carried by the Client-mode broadcast request. The peer ignores it.
pub const BROADCAST_FILLER: i32 = 8888;

/// Runtime knobs for the tick scheduler and main loop.
///
/// ```
/// use armlink_core::Config;
///
/// let cfg = Config {
///     adc_self_test: true,
///     ..Default::default()
/// };
/// assert_eq!(cfg.heartbeat_period, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Ticks between heartbeat LED toggles (and self-test requests).
    pub heartbeat_period: u32,
    /// Ticks between forced resends in Command mode.
    pub resend_period: u32,
    /// Sample and print the ADC each heartbeat.
    pub adc_self_test: bool,
}

impl Config {
    /// Defaults usable in `const`/`static` initializers.
    pub const DEFAULT: Self = Self {
        heartbeat_period: 10,
        resend_period: TICK_HZ,
        adc_self_test: false,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
