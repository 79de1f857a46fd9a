// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # ArmLink Firmware
//!
//! Robotic-arm remote-control node on an STM32F767ZI Nucleo-144.
//!
//! - SysTick (10 Hz) drives the scheduler tick.
//! - USART2 is the peer link, USART3 the operator console. Both receive in interrupts.
//! - The user button cycles Configure -> Client -> Command.
//! - The main loop runs [`Driver::step`] forever.
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release
//! ```

#![no_main]
#![no_std]

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::{free, Mutex};
use cortex_m::peripheral::{syst::SystClkSource, NVIC};
use cortex_m_rt::{entry, exception};
use panic_halt as _;

use hal::{
    gpio::{gpiob, Output, PushPull},
    pac::{self, interrupt},
    prelude::*,
    serial::{self, Serial},
};
use stm32f7xx_hal as hal;

use armlink_core::{config::TICK_HZ, handlers, io::ByteWriter, Config, Driver, SharedState};

mod hw;
use hw::{
    BoardPins, Led, Potentiometers, Servos, Shared, Slot, StatusLeds, Usart, UsartRx, UserButton,
};

const BAUD_RATE: u32 = 115_200;

type Leds = StatusLeds<
    gpiob::PB0<Output<PushPull>>,
    gpiob::PB7<Output<PushPull>>,
    gpiob::PB14<Output<PushPull>>,
>;

static STATE: SharedState = SharedState::new(Config {
    adc_self_test: cfg!(feature = "adc-self-test"),
    ..Config::DEFAULT
});

static CONSOLE: Slot<Usart<pac::USART3>> = Mutex::new(RefCell::new(None));
static CONSOLE_RX: Slot<UsartRx<pac::USART3>> = Mutex::new(RefCell::new(None));
static LINK: Slot<Usart<pac::USART2>> = Mutex::new(RefCell::new(None));
static LINK_RX: Slot<UsartRx<pac::USART2>> = Mutex::new(RefCell::new(None));
static LEDS: Slot<Leds> = Mutex::new(RefCell::new(None));

fn usart_config() -> serial::Config {
    serial::Config {
        baud_rate: BAUD_RATE.bps(),
        ..Default::default()
    }
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks (HSI, no APB prescaling: timer clocks run at SYSCLK)
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let sysclk = clocks.sysclk().raw();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // LEDs
    let leds = StatusLeds {
        heartbeat: Led::active_high(pins.leds.green),
        primary: Led::active_high(pins.leds.blue),
        secondary: Led::active_high(pins.leds.red),
    };

    // USART3 (console) and USART2 (peer link)
    let console = Serial::new(
        dp.USART3,
        (pins.console.tx, pins.console.rx),
        &clocks,
        usart_config(),
    );
    let link = Serial::new(
        dp.USART2,
        (pins.link.tx, pins.link.rx),
        &clocks,
        usart_config(),
    );
    let (mut console_tx, console_rx) = Usart::new(console);
    let (link_tx, link_rx) = Usart::new(link);

    let _ = writeln!(console_tx, "armlink: {} Hz tick, {} baud\r", TICK_HZ, BAUD_RATE);

    // Potentiometers, servos, button
    let pots = Potentiometers::new(dp.ADC1, pins.pots);
    let servos = Servos::new(dp.TIM1, dp.TIM8, pins.servos, sysclk);
    let _button = UserButton::new(pins.button, &dp.SYSCFG, &dp.EXTI);

    // Hand the interrupt-side peripherals over before any interrupt can fire
    Shared::new(&CONSOLE).install(console_tx);
    Shared::new(&CONSOLE_RX).install(console_rx);
    Shared::new(&LINK).install(link_tx);
    Shared::new(&LINK_RX).install(link_rx);
    Shared::new(&LEDS).install(leds);

    // 10 Hz SysTick
    let mut syst = cp.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(sysclk / TICK_HZ - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    unsafe {
        NVIC::unmask(pac::Interrupt::USART2);
        NVIC::unmask(pac::Interrupt::USART3);
        NVIC::unmask(pac::Interrupt::EXTI15_10);
    }

    let mut driver = Driver::new(
        &STATE,
        pots,
        servos,
        Shared::new(&LINK),
        Shared::new(&LEDS),
        ByteWriter(Shared::new(&CONSOLE)),
    );

    loop {
        driver.step();
    }
}

#[exception]
fn SysTick() {
    handlers::on_tick(&STATE, &mut Shared::new(&LEDS));
}

/// Peer link receive.
#[interrupt]
fn USART2() {
    let mut console = Shared::new(&CONSOLE);
    free(|cs| {
        if let Some(rx) = LINK_RX.borrow(cs).borrow_mut().as_mut() {
            while let Some(b) = rx.read_byte() {
                handlers::on_link_byte(&STATE, b, &mut console);
            }
        }
    });
}

/// Console receive.
#[interrupt]
fn USART3() {
    let mut link = Shared::new(&LINK);
    let mut console = Shared::new(&CONSOLE);
    free(|cs| {
        if let Some(rx) = CONSOLE_RX.borrow(cs).borrow_mut().as_mut() {
            while let Some(b) = rx.read_byte() {
                handlers::on_console_byte(&STATE, b, &mut link, &mut console);
            }
        }
    });
}

/// User button.
#[interrupt]
fn EXTI15_10() {
    if UserButton::debounced() {
        handlers::on_external_edge(&STATE);
    }
    UserButton::clear_pending();
}
