//! GPIO adapters
//!
//! Wrap embassy-rp pins so the board-agnostic crates can drive them. The
//! `inverted` flag from [`PinConfig`] is applied here, so callers always
//! see logic levels.

use countdown_core::config::PinConfig;
use countdown_hal::{InputPin, OutputPin};
use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;

/// Output pin with optional inversion
pub struct ConfigOutput<'d> {
    pin: Output<'d>,
    inverted: bool,
}

impl<'d> ConfigOutput<'d> {
    /// Configure `pin` as an output, driven to logic low
    pub fn new(pin: Peri<'d, AnyPin>, config: &PinConfig) -> Self {
        let level = if config.inverted { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, level),
            inverted: config.inverted,
        }
    }
}

impl OutputPin for ConfigOutput<'_> {
    fn set_high(&mut self) {
        if self.inverted {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
    }

    fn set_low(&mut self) {
        if self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}

/// Input pin with optional pull-up and inversion
pub struct ConfigInput<'d> {
    pin: Input<'d>,
    inverted: bool,
}

impl<'d> ConfigInput<'d> {
    /// Configure `pin` as an input
    pub fn new(pin: Peri<'d, AnyPin>, config: &PinConfig) -> Self {
        let pull = if config.pull_up { Pull::Up } else { Pull::None };
        Self {
            pin: Input::new(pin, pull),
            inverted: config.inverted,
        }
    }

    /// Wait for the logic level to change
    pub async fn wait_for_any_edge(&mut self) {
        self.pin.wait_for_any_edge().await;
    }

    /// Wait until the key reads pressed (logic low)
    pub async fn wait_for_low(&mut self) {
        if self.inverted {
            self.pin.wait_for_high().await;
        } else {
            self.pin.wait_for_low().await;
        }
    }
}

impl InputPin for ConfigInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high() != self.inverted
    }
}
