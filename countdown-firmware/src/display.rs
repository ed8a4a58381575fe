//! Presenters available to the firmware
//!
//! The tick task needs one concrete presenter type, so the OLED and the
//! logging variants are wrapped in [`AnyPresenter`].

use countdown_core::config::TimerConfig;
use countdown_core::presenter::{Presenter, ScreenState, SurfacePresenter};
use countdown_display::{DisplayError, FramePanel, Sh1107};
use countdown_hal::SpiConfig;
use countdown_hal_rp2040::gpio::ConfigOutput;
use countdown_hal_rp2040::spi::PanelSpi;
use embassy_rp::peripherals::SPI1;
use embassy_time::Delay;
use defmt::*;

use crate::board::DisplayPins;

/// The SH1107 panel as wired on the board
pub type OledPanel = Sh1107<
    PanelSpi<'static, SPI1>,
    ConfigOutput<'static>,
    ConfigOutput<'static>,
    ConfigOutput<'static>,
    Delay,
>;

/// Presenter that writes the timer to the defmt log
///
/// Only logs when the text or pause flag changed since the last render.
#[derive(Default)]
pub struct LogPresenter {
    state: ScreenState,
    changed: bool,
}

impl Presenter for LogPresenter {
    fn set_text(&mut self, text: &str) {
        self.changed |= self.state.set_text(text);
    }

    fn set_paused(&mut self, paused: bool) {
        self.changed |= self.state.set_paused(paused);
    }

    fn render(&mut self, _now_ms: u64) {
        if core::mem::take(&mut self.changed) {
            let marker = if self.state.paused { " [paused]" } else { "" };
            info!("Display: {}{}", self.state.text.as_str(), marker);
        }
    }
}

/// Presenter selected at startup
pub enum AnyPresenter {
    Oled(SurfacePresenter<OledPanel>),
    Log(LogPresenter),
}

impl AnyPresenter {
    /// Bring up the panel, falling back to logging if it does not respond
    pub fn oled(pins: DisplayPins, config: &TimerConfig) -> Self {
        let spi_config = SpiConfig::mode0(config.display.spi_frequency);
        let spi = PanelSpi::new(pins.spi, pins.sck, pins.mosi, &spi_config);
        let mut panel = Sh1107::new(spi, pins.dc, pins.cs, pins.rst, Delay);

        match panel.init() {
            Ok(()) => {
                info!("OLED initialized");
                Self::Oled(SurfacePresenter::new(panel, &config.blink))
            }
            Err(e) => {
                error!("Failed to initialize display: {:?}, logging instead", e);
                Self::log()
            }
        }
    }

    pub fn log() -> Self {
        Self::Log(LogPresenter::default())
    }
}

impl Presenter for AnyPresenter {
    fn set_text(&mut self, text: &str) {
        match self {
            Self::Oled(p) => p.set_text(text),
            Self::Log(p) => p.set_text(text),
        }
    }

    fn set_paused(&mut self, paused: bool) {
        match self {
            Self::Oled(p) => p.set_paused(paused),
            Self::Log(p) => p.set_paused(paused),
        }
    }

    fn render(&mut self, now_ms: u64) {
        match self {
            Self::Oled(p) => p.render(now_ms),
            Self::Log(p) => p.render(now_ms),
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        match self {
            Self::Oled(p) => p.flush(),
            Self::Log(p) => p.flush(),
        }
    }
}
