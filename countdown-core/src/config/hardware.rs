//! Hardware configuration types
//!
//! Pin assignments for the display control lines, keys and encoder, plus
//! the pin-string syntax used in the configuration file.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Logic level is inverted relative to the electrical level
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }

    /// Parse a pin string from config
    ///
    /// Supports formats, with modifiers in any order:
    /// - "gpio11" -> pin 11
    /// - "!gpio12" -> pin 12, inverted
    /// - "^gpio4" -> pin 4, pull-up enabled
    pub fn parse(s: &str) -> Option<Self> {
        let mut config = Self::default();
        let mut s = s.trim();

        loop {
            if let Some(rest) = s.strip_prefix('!') {
                config.inverted = true;
                s = rest;
            } else if let Some(rest) = s.strip_prefix('^') {
                config.pull_up = true;
                s = rest;
            } else {
                break;
            }
        }

        config.pin = s.strip_prefix("gpio")?.parse().ok()?;
        if config.pin >= GPIO_COUNT {
            return None;
        }

        Some(config)
    }
}

/// Which presenter renders the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PresenterKind {
    /// SH1107 OLED panel
    #[default]
    Oled,
    /// Log the display text only
    Log,
}

/// Display panel wiring
///
/// SCK and MOSI are fixed by the board (SPI1 on GPIO10/11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    pub presenter: PresenterKind,
    /// Data/command select
    pub dc_pin: PinConfig,
    /// Chip select
    pub cs_pin: PinConfig,
    /// Panel reset
    pub rst_pin: PinConfig,
    /// SPI clock in Hz
    pub spi_frequency: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            presenter: PresenterKind::Oled,
            dc_pin: PinConfig::new(8),
            cs_pin: PinConfig::new(9),
            rst_pin: PinConfig::new(12),
            spi_frequency: 20_000_000,
        }
    }
}

/// Key wiring and behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyConfig {
    /// Start/pause key
    pub primary_pin: PinConfig,
    /// Add-a-minute key (unused in rotary mode)
    pub secondary_pin: PinConfig,
    /// Bounce window for edge-driven keys
    pub debounce_ms: u32,
    /// Seconds added by the secondary key
    pub adjust_s: i32,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            primary_pin: PinConfig::with_pullup(15),
            secondary_pin: PinConfig::with_pullup(17),
            debounce_ms: 20,
            adjust_s: 60,
        }
    }
}

/// Quadrature encoder wiring and position mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotaryConfig {
    pub a_pin: PinConfig,
    pub b_pin: PinConfig,
    /// Last position on the fine scale
    pub fine_limit: u32,
    /// Seconds per detent up to `fine_limit`
    pub fine_step_s: u32,
    /// Seconds per detent past `fine_limit`
    pub coarse_step_s: u32,
}

impl Default for RotaryConfig {
    fn default() -> Self {
        Self {
            a_pin: PinConfig::with_pullup(2),
            b_pin: PinConfig::with_pullup(3),
            fine_limit: 12,
            fine_step_s: 5,
            coarse_step_s: 60,
        }
    }
}
