//! Countdown timer firmware
//!
//! RP2040 firmware for a kitchen-style countdown timer: an SH1107 OLED
//! shows the remaining time, two keys or a rotary encoder set it, and a
//! piezo buzzer sounds when it runs out.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use countdown_core::config::PresenterKind;
use countdown_core::Controller;
use countdown_hal_rp2040::pins::PinBank;
use countdown_hal_rp2040::tone::PwmTone;

use crate::board::DisplayPins;
use crate::display::AnyPresenter;
use crate::input::AnyInput;
use crate::tasks::TimerController;

mod board;
mod config;
mod display;
mod input;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit timer.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../timer.toml");

static CONTROLLER: StaticCell<TimerController> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Countdown firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);
    let (mut bank, board) = PinBank::split(p);

    let presenter = match config.display.presenter {
        PresenterKind::Oled => {
            match DisplayPins::take(&mut bank, board.spi, board.spi_sck, board.spi_mosi, &config) {
                Ok(pins) => AnyPresenter::oled(pins, &config),
                Err(e) => {
                    error!("Display pins unavailable: {:?}, logging instead", e);
                    AnyPresenter::log()
                }
            }
        }
        PresenterKind::Log => AnyPresenter::log(),
    };

    let tone = PwmTone::new(board.buzzer_slice, board.buzzer_pin);

    let input = match AnyInput::start(&config, &mut bank, &spawner) {
        Ok(input) => input,
        Err(e) => {
            error!("Input pins unavailable: {:?}, keys disabled", e);
            AnyInput::inert(&config)
        }
    };

    let controller = CONTROLLER.init(Controller::new(
        &config,
        input,
        presenter,
        tone,
        tasks::tick::now(),
    ));

    let period = Duration::from_millis(u64::from(config.tick_ms));
    spawner.spawn(tasks::tick_task(controller, period)).unwrap();

    info!("Countdown firmware ready");
}
