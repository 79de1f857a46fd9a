// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! User button (PC13) on EXTI line 13.

use stm32f7xx_hal::{
    gpio::{gpioc, Floating, Input},
    pac,
};

/// Reads taken per edge.
const DEBOUNCE_SAMPLES: u32 = 1000;
/// Reads that must be high to accept the edge.
const DEBOUNCE_THRESHOLD: u32 = 990;

pub struct UserButton {
    _pin: gpioc::PC13<Input<Floating>>,
}

impl UserButton {
    /// Route PC13 to EXTI13 and interrupt on the rising edge.
    pub fn new(pin: gpioc::PC13<Input<Floating>>, syscfg: &pac::SYSCFG, exti: &pac::EXTI) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

        // EXTI13 source: port C
        syscfg
            .exticr4
            .modify(|_, w| unsafe { w.exti13().bits(0b0010) });

        exti.rtsr.modify(|_, w| w.tr13().set_bit());
        exti.imr.modify(|_, w| w.mr13().set_bit());

        Self { _pin: pin }
    }

    #[inline]
    pub fn is_high() -> bool {
        let gpioc = unsafe { &*pac::GPIOC::ptr() };
        gpioc.idr.read().idr13().bit_is_set()
    }

    /// Sample the pin in a tight loop and accept the press only if it stayed high.
    pub fn debounced() -> bool {
        let high = (0..DEBOUNCE_SAMPLES).filter(|_| Self::is_high()).count() as u32;
        high > DEBOUNCE_THRESHOLD
    }

    #[inline]
    pub fn clear_pending() {
        let exti = unsafe { &*pac::EXTI::ptr() };
        exti.pr.write(|w| w.pr13().set_bit());
    }
}
