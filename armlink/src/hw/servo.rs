// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Servo PWM outputs on TIM1 and TIM8.
//!
//! Both timers count at 1 MHz with a 20 ms period, so a compare value is the pulse width in
//! microseconds. Channels 1..4 are TIM1_CH1..CH4 (PE9, PE11, PE13, PE14), channel 5 is TIM8_CH1
//! (PC6). Every output starts centered.

use armlink_core::config::PULSE_CENTER_US;
use armlink_core::io::{pulse_in_range, Channel, ServoOutput};
use stm32f7xx_hal::pac;

use crate::hw::pins::ServoPins;

/// 50 Hz frame.
const PERIOD_US: u16 = 20_000;

pub struct Servos {
    tim1: pac::TIM1,
    tim8: pac::TIM8,
    _pins: ServoPins,
}

fn init_pwm(tim: &pac::tim1::RegisterBlock, psc: u16) {
    // Disable counter while configuring
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    // 1 tick per microsecond, 20 000 ticks per frame
    tim.psc.write(|w| w.psc().bits(psc));
    tim.arr.write(|w| w.arr().bits(PERIOD_US - 1));

    // PWM mode 1 with preload on all four channels
    tim.ccmr1_output().modify(|_, w| {
        w.oc1m()
            .pwm_mode1()
            .oc1pe()
            .enabled()
            .oc2m()
            .pwm_mode1()
            .oc2pe()
            .enabled()
    });
    tim.ccmr2_output().modify(|_, w| {
        w.oc3m()
            .pwm_mode1()
            .oc3pe()
            .enabled()
            .oc4m()
            .pwm_mode1()
            .oc4pe()
            .enabled()
    });

    tim.ccr1().write(|w| w.ccr().bits(PULSE_CENTER_US));
    tim.ccr2().write(|w| w.ccr().bits(PULSE_CENTER_US));
    tim.ccr3().write(|w| w.ccr().bits(PULSE_CENTER_US));
    tim.ccr4().write(|w| w.ccr().bits(PULSE_CENTER_US));

    // Advanced timers gate their outputs behind MOE
    tim.bdtr.modify(|_, w| w.moe().set_bit());

    // Load prescaler and compare values, then run
    tim.egr.write(|w| w.ug().set_bit());
    tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());
}

impl Servos {
    /// Configure both timers from a `timer_clk_hz` APB2 timer clock.
    pub fn new(tim1: pac::TIM1, tim8: pac::TIM8, pins: ServoPins, timer_clk_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr
            .modify(|_, w| w.tim1en().set_bit().tim8en().set_bit());

        let psc = (timer_clk_hz / 1_000_000).saturating_sub(1) as u16;
        init_pwm(&tim1, psc);
        init_pwm(&tim8, psc);

        tim1.ccer.modify(|_, w| {
            w.cc1e()
                .set_bit()
                .cc2e()
                .set_bit()
                .cc3e()
                .set_bit()
                .cc4e()
                .set_bit()
        });
        tim8.ccer.modify(|_, w| w.cc1e().set_bit());

        Self {
            tim1,
            tim8,
            _pins: pins,
        }
    }
}

impl ServoOutput for Servos {
    /// Pulses outside 1000..=2000 µs are ignored.
    fn set_pulse(&mut self, channel: Channel, pulse_us: u16) {
        if !pulse_in_range(pulse_us as u32) {
            return;
        }

        match channel.number() {
            1 => self.tim1.ccr1().write(|w| w.ccr().bits(pulse_us)),
            2 => self.tim1.ccr2().write(|w| w.ccr().bits(pulse_us)),
            3 => self.tim1.ccr3().write(|w| w.ccr().bits(pulse_us)),
            4 => self.tim1.ccr4().write(|w| w.ccr().bits(pulse_us)),
            _ => self.tim8.ccr1().write(|w| w.ccr().bits(pulse_us)),
        }
    }
}
