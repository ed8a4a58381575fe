//! Blocking SPI adapter for the display panel

use countdown_hal::{SpiBus, SpiConfig};
use embassy_rp::spi::{self, Blocking, ClkPin, Instance, MosiPin, Phase, Polarity, Spi};
use embassy_rp::Peri;

/// Transmit-only blocking SPI master
pub struct PanelSpi<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> PanelSpi<'d, T> {
    /// Bring up the SPI block with clock and data pins only
    pub fn new(
        inner: Peri<'d, T>,
        clk: Peri<'d, impl ClkPin<T>>,
        mosi: Peri<'d, impl MosiPin<T>>,
        config: &SpiConfig,
    ) -> Self {
        let mut spi_config = spi::Config::default();
        spi_config.frequency = config.frequency;
        spi_config.polarity = match config.polarity {
            countdown_hal::spi::Polarity::IdleLow => Polarity::IdleLow,
            countdown_hal::spi::Polarity::IdleHigh => Polarity::IdleHigh,
        };
        spi_config.phase = match config.phase {
            countdown_hal::spi::Phase::CaptureOnFirstTransition => Phase::CaptureOnFirstTransition,
            countdown_hal::spi::Phase::CaptureOnSecondTransition => {
                Phase::CaptureOnSecondTransition
            }
        };

        Self {
            spi: Spi::new_blocking_txonly(inner, clk, mosi, spi_config),
        }
    }
}

impl<T: Instance> SpiBus for PanelSpi<'_, T> {
    type Error = spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.blocking_write(data)
    }
}
