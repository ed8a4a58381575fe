//! Configuration type definitions
//!
//! The timer configuration is compiled into the firmware as a TOML file
//! and parsed at boot (see [`super::parse`]).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::{
    DisplayConfig, KeyConfig, PinConfig, PresenterKind, RotaryConfig, GPIO_COUNT,
};
use crate::rotary::RotaryMapping;

/// Shortest accepted tick period
pub const MIN_TICK_MS: u32 = 100;

/// Longest accepted tick period
pub const MAX_TICK_MS: u32 = 500;

/// Audible tone range
pub const MIN_TONE_HZ: u32 = 20;
pub const MAX_TONE_HZ: u32 = 20_000;

/// Input hardware variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputMode {
    /// Two keys with edge interrupts
    #[default]
    Buttons,
    /// Two keys sampled every tick
    ButtonsPolled,
    /// One key plus a quadrature encoder
    Rotary,
}

/// Pause/alarm glyph blink timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlinkConfig {
    pub show_ms: u32,
    pub hide_ms: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            show_ms: 500,
            hide_ms: 500,
        }
    }
}

/// Piezo buzzer tone and beep cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuzzerConfig {
    /// Tone frequency in Hz
    pub frequency: u32,
    /// High-time fraction, 0..=65535
    pub duty: u16,
    /// Beep length
    pub on_ms: u32,
    /// Silence between beeps
    pub off_ms: u32,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            frequency: 800,
            duty: 32768,
            on_ms: 500,
            off_ms: 500,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period outside 100-500 ms
    TickPeriod,
    /// Blink or beep phase of zero length
    BlinkDuration,
    /// Tone outside the audible range
    BuzzerFrequency,
    /// Rotary step of zero seconds
    RotaryMapping,
    /// GPIO number past the last pin
    PinOutOfRange(u8),
    /// GPIO assigned twice, or to a board-reserved function
    PinConflict(u8),
}

/// Complete timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerConfig {
    /// Control loop period
    pub tick_ms: u32,
    pub input: InputMode,
    pub display: DisplayConfig,
    pub keys: KeyConfig,
    pub blink: BlinkConfig,
    pub buzzer: BuzzerConfig,
    pub rotary: RotaryConfig,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            input: InputMode::Buttons,
            display: DisplayConfig::default(),
            keys: KeyConfig::default(),
            blink: BlinkConfig::default(),
            buzzer: BuzzerConfig::default(),
            rotary: RotaryConfig::default(),
        }
    }
}

impl TimerConfig {
    /// Create the reference-board configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Position mapping for the rotary build
    pub fn rotary_mapping(&self) -> RotaryMapping {
        RotaryMapping {
            fine_limit: self.rotary.fine_limit,
            fine_step_s: self.rotary.fine_step_s,
            coarse_step_s: self.rotary.coarse_step_s,
        }
    }

    /// Check ranges and pin assignments
    ///
    /// `reserved` lists pins the board wiring already uses (SPI clock and
    /// data, buzzer PWM); any configured pin landing on one is a conflict.
    pub fn validate(&self, reserved: &[u8]) -> Result<(), ConfigError> {
        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&self.tick_ms) {
            return Err(ConfigError::TickPeriod);
        }
        if self.blink.show_ms == 0
            || self.blink.hide_ms == 0
            || self.buzzer.on_ms == 0
            || self.buzzer.off_ms == 0
        {
            return Err(ConfigError::BlinkDuration);
        }
        if !(MIN_TONE_HZ..=MAX_TONE_HZ).contains(&self.buzzer.frequency) {
            return Err(ConfigError::BuzzerFrequency);
        }
        if self.input == InputMode::Rotary
            && (self.rotary.fine_step_s == 0 || self.rotary.coarse_step_s == 0)
        {
            return Err(ConfigError::RotaryMapping);
        }

        let mut claimed = PinSet::default();
        for &pin in reserved {
            claimed.claim(pin)?;
        }
        for pin in self.active_pins() {
            claimed.claim(pin.pin)?;
        }
        Ok(())
    }

    /// Pins the selected input mode and presenter actually drive
    fn active_pins(&self) -> impl Iterator<Item = PinConfig> {
        let display = match self.display.presenter {
            PresenterKind::Oled => Some([
                self.display.dc_pin,
                self.display.cs_pin,
                self.display.rst_pin,
            ]),
            PresenterKind::Log => None,
        };
        let inputs = match self.input {
            InputMode::Buttons | InputMode::ButtonsPolled => {
                [self.keys.primary_pin, self.keys.secondary_pin]
            }
            InputMode::Rotary => [self.rotary.a_pin, self.rotary.b_pin],
        };
        let knob_key = (self.input == InputMode::Rotary).then_some(self.keys.primary_pin);

        display
            .into_iter()
            .flatten()
            .chain(inputs)
            .chain(knob_key)
    }
}

/// Claimed GPIO bitmap
#[derive(Default)]
struct PinSet(u32);

impl PinSet {
    fn claim(&mut self, pin: u8) -> Result<(), ConfigError> {
        if pin >= GPIO_COUNT {
            return Err(ConfigError::PinOutOfRange(pin));
        }
        let bit = 1u32 << pin;
        if self.0 & bit != 0 {
            return Err(ConfigError::PinConflict(pin));
        }
        self.0 |= bit;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESERVED: &[u8] = &[5, 10, 11];

    #[test]
    fn test_default_is_valid() {
        assert_eq!(TimerConfig::default().validate(RESERVED), Ok(()));

        let mut rotary = TimerConfig::default();
        rotary.input = InputMode::Rotary;
        assert_eq!(rotary.validate(RESERVED), Ok(()));
    }

    #[test]
    fn test_tick_period_bounds() {
        let mut config = TimerConfig::default();
        config.tick_ms = 99;
        assert_eq!(config.validate(RESERVED), Err(ConfigError::TickPeriod));
        config.tick_ms = 500;
        assert_eq!(config.validate(RESERVED), Ok(()));
        config.tick_ms = 501;
        assert_eq!(config.validate(RESERVED), Err(ConfigError::TickPeriod));
    }

    #[test]
    fn test_zero_blink_rejected() {
        let mut config = TimerConfig::default();
        config.blink.hide_ms = 0;
        assert_eq!(config.validate(RESERVED), Err(ConfigError::BlinkDuration));

        let mut config = TimerConfig::default();
        config.buzzer.on_ms = 0;
        assert_eq!(config.validate(RESERVED), Err(ConfigError::BlinkDuration));
    }

    #[test]
    fn test_buzzer_frequency_range() {
        let mut config = TimerConfig::default();
        config.buzzer.frequency = 19;
        assert_eq!(config.validate(RESERVED), Err(ConfigError::BuzzerFrequency));
        config.buzzer.frequency = 25_000;
        assert_eq!(config.validate(RESERVED), Err(ConfigError::BuzzerFrequency));
    }

    #[test]
    fn test_rotary_steps_only_checked_in_rotary_mode() {
        let mut config = TimerConfig::default();
        config.rotary.coarse_step_s = 0;
        assert_eq!(config.validate(RESERVED), Ok(()));
        config.input = InputMode::Rotary;
        assert_eq!(config.validate(RESERVED), Err(ConfigError::RotaryMapping));
    }

    #[test]
    fn test_pin_conflicts() {
        let mut config = TimerConfig::default();
        config.keys.secondary_pin = PinConfig::with_pullup(15);
        assert_eq!(config.validate(RESERVED), Err(ConfigError::PinConflict(15)));

        let mut config = TimerConfig::default();
        config.display.dc_pin = PinConfig::new(10);
        assert_eq!(config.validate(RESERVED), Err(ConfigError::PinConflict(10)));

        let mut config = TimerConfig::default();
        config.keys.primary_pin = PinConfig::new(31);
        assert_eq!(config.validate(RESERVED), Err(ConfigError::PinOutOfRange(31)));
    }

    #[test]
    fn test_unused_pins_not_claimed() {
        // Display lines are free when only logging
        let mut config = TimerConfig::default();
        config.display.presenter = PresenterKind::Log;
        config.display.dc_pin = PinConfig::new(15);
        assert_eq!(config.validate(RESERVED), Ok(()));

        // Secondary key is free in rotary mode
        let mut config = TimerConfig::default();
        config.input = InputMode::Rotary;
        config.keys.secondary_pin = PinConfig::new(2);
        assert_eq!(config.validate(RESERVED), Ok(()));
    }

    #[test]
    fn test_rotary_mapping_from_config() {
        let mut config = TimerConfig::default();
        config.rotary.fine_step_s = 10;
        let mapping = config.rotary_mapping();
        assert_eq!(mapping.to_seconds(2), 20);
    }
}
