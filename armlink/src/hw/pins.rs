// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767ZI Nucleo-144 board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, gpioe, Alternate, Analog, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub console: Usart3Pins,
    pub link: Usart2Pins,
    pub pots: PotPins,
    pub servos: ServoPins,
    pub button: gpioc::PC13<Input<Floating>>,
}

pub struct LedPins {
    pub green: gpiob::PB0<Output<PushPull>>, // LD1
    pub blue: gpiob::PB7<Output<PushPull>>,  // LD2
    pub red: gpiob::PB14<Output<PushPull>>,  // LD3
}

/// Console, routed to the ST-LINK virtual COM port.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// Peer link to the radio module.
pub struct Usart2Pins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// Potentiometer wipers, ADC1_IN1..ADC1_IN5. Owned by the ADC driver, never read.
#[allow(dead_code)]
pub struct PotPins {
    pub pa1: gpioa::PA1<Analog>,
    pub pa2: gpioa::PA2<Analog>,
    pub pa3: gpioa::PA3<Analog>,
    pub pa4: gpioa::PA4<Analog>,
    pub pa5: gpioa::PA5<Analog>,
}

/// Servo signal outputs. Owned by the PWM driver, never read.
#[allow(dead_code)]
pub struct ServoPins {
    pub ch1: gpioe::PE9<Alternate<1>>,  // TIM1_CH1
    pub ch2: gpioe::PE11<Alternate<1>>, // TIM1_CH2
    pub ch3: gpioe::PE13<Alternate<1>>, // TIM1_CH3
    pub ch4: gpioe::PE14<Alternate<1>>, // TIM1_CH4
    pub ch5: gpioc::PC6<Alternate<3>>,  // TIM8_CH1
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            leds: LedPins {
                green: gpiob.pb0.into_push_pull_output(),
                blue: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            console: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            link: Usart2Pins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            pots: PotPins {
                pa1: gpioa.pa1.into_analog(),
                pa2: gpioa.pa2.into_analog(),
                pa3: gpioa.pa3.into_analog(),
                pa4: gpioa.pa4.into_analog(),
                pa5: gpioa.pa5.into_analog(),
            },

            servos: ServoPins {
                ch1: gpioe.pe9.into_alternate::<1>(),
                ch2: gpioe.pe11.into_alternate::<1>(),
                ch3: gpioe.pe13.into_alternate::<1>(),
                ch4: gpioe.pe14.into_alternate::<1>(),
                ch5: gpioc.pc6.into_alternate::<3>(),
            },

            button: gpioc.pc13.into_floating_input(),
        }
    }
}
