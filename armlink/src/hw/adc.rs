// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Potentiometer sampling on ADC1 using direct PAC register access.
//!
//! The five arm potentiometers sit on PA1..PA5 (ADC1_IN1..ADC1_IN5). A snapshot is five blocking
//! single-channel conversions in a row; the overrun flag is checked and cleared after each one.
//!
//! Example:
//! ```no_run
//! let mut pots = Potentiometers::new(dp.ADC1, pins.pots);
//! let mut samples = [0u16; 5];
//! pots.read(&mut samples).ok();
//! ```

use armlink_core::config::CHANNELS;
use armlink_core::io::{AdcError, AnalogInput};
use stm32f7xx_hal::pac;

use crate::hw::pins::PotPins;

/// ADC1 input channel for each potentiometer, channel 1 first.
const POT_CHANNELS: [u8; CHANNELS] = [1, 2, 3, 4, 5];

/// Core cycles covering the ADC power-up time at the 216 MHz ceiling.
const ADC_STAB_CYCLES: u32 = 1_000;

pub struct Potentiometers {
    adc: pac::ADC1,
    _pins: PotPins,
}

fn init_basic_adc(adc: &pac::adc1::RegisterBlock) {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / 4
    common.ccr.modify(|_, w| w.adcpre().div4());

    // Power off to configure
    adc.cr2.modify(|_, w| w.adon().clear_bit());

    // 12-bit, right-aligned, software trigger
    adc.cr1.modify(|_, w| w.res().bits(0b00));
    adc.cr2.modify(|_, w| {
        w.cont().clear_bit();
        w.align().right();
        w.exten().disabled();
        w
    });

    // Long sample time on every pot channel; the wipers are high impedance.
    adc.smpr2.modify(|_, w| {
        w.smp1().bits(0b111);
        w.smp2().bits(0b111);
        w.smp3().bits(0b111);
        w.smp4().bits(0b111);
        w.smp5().bits(0b111);
        w
    });

    // Sequence length = 1 conversion
    adc.sqr1.modify(|_, w| w.l().bits(0));

    // Power on, then wait out tSTAB (3 µs) before the first SWSTART
    adc.cr2.modify(|_, w| w.adon().set_bit());
    cortex_m::asm::delay(ADC_STAB_CYCLES);
}

/// Convert one channel. Returns the sample and whether an overrun was flagged.
fn convert(adc: &pac::adc1::RegisterBlock, channel: u8) -> (u16, bool) {
    adc.sqr3
        .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

    // Start
    adc.cr2.modify(|_, w| w.swstart().set_bit());

    // Wait for completion
    while adc.sr.read().eoc().bit_is_clear() {}

    let sample = adc.dr.read().data().bits() as u16;

    let overrun = adc.sr.read().ovr().bit_is_set();
    if overrun {
        adc.sr.modify(|_, w| w.ovr().clear_bit());
    }

    (sample, overrun)
}

impl Potentiometers {
    /// Enable the ADC1 clock and configure it for software-triggered single conversions.
    pub fn new(adc1: pac::ADC1, pins: PotPins) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        init_basic_adc(&adc1);

        Self { adc: adc1, _pins: pins }
    }
}

impl AnalogInput for Potentiometers {
    fn read(&mut self, out: &mut [u16; CHANNELS]) -> Result<(), AdcError> {
        let mut overrun = false;
        for (slot, &ch) in out.iter_mut().zip(POT_CHANNELS.iter()) {
            let (sample, ovr) = convert(&self.adc, ch);
            *slot = sample;
            overrun |= ovr;
        }

        if overrun {
            Err(AdcError::Overrun)
        } else {
            Ok(())
        }
    }
}
