//! Board wiring
//!
//! Turns the configuration's pin numbers into configured embassy-rp pins.
//! Fixed-function pins come from [`BoardPeripherals`]; everything else is
//! taken from the [`PinBank`] by number.

use countdown_core::config::{PinConfig, TimerConfig};
use countdown_hal_rp2040::gpio::{ConfigInput, ConfigOutput};
use countdown_hal_rp2040::pins::{PinBank, PinError};
use embassy_rp::peripherals::{PIN_10, PIN_11, SPI1};
use embassy_rp::Peri;

/// Everything the SH1107 panel is wired to
pub struct DisplayPins {
    pub spi: Peri<'static, SPI1>,
    pub sck: Peri<'static, PIN_10>,
    pub mosi: Peri<'static, PIN_11>,
    pub dc: ConfigOutput<'static>,
    pub cs: ConfigOutput<'static>,
    pub rst: ConfigOutput<'static>,
}

impl DisplayPins {
    pub fn take(
        bank: &mut PinBank,
        spi: Peri<'static, SPI1>,
        sck: Peri<'static, PIN_10>,
        mosi: Peri<'static, PIN_11>,
        config: &TimerConfig,
    ) -> Result<Self, PinError> {
        let display = &config.display;
        Ok(Self {
            spi,
            sck,
            mosi,
            dc: output(bank, &display.dc_pin)?,
            cs: output(bank, &display.cs_pin)?,
            rst: output(bank, &display.rst_pin)?,
        })
    }
}

/// Take a pin by config and set it up as an output
pub fn output(bank: &mut PinBank, config: &PinConfig) -> Result<ConfigOutput<'static>, PinError> {
    Ok(ConfigOutput::new(bank.take(config.pin)?, config))
}

/// Take a pin by config and set it up as an input
pub fn input(bank: &mut PinBank, config: &PinConfig) -> Result<ConfigInput<'static>, PinError> {
    Ok(ConfigInput::new(bank.take(config.pin)?, config))
}
