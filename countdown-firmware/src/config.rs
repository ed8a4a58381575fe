//! Boot-time configuration loading
//!
//! The configuration is compiled in from `timer.toml`. A file that fails to
//! parse or validate never stops the timer: the reference-board defaults
//! are used instead and the problem is logged.

use countdown_core::config::{parse_config, InputMode, PresenterKind, TimerConfig};
use countdown_hal_rp2040::pins::BOARD_RESERVED;
use defmt::*;

/// Parse and validate the embedded configuration
pub fn load(source: &str) -> TimerConfig {
    let config = match parse_config(source) {
        Ok(config) => config,
        Err(e) => {
            error!("Config parse failed: {:?}, using defaults", e);
            return TimerConfig::default();
        }
    };

    if let Err(e) = config.validate(&BOARD_RESERVED) {
        error!("Config rejected: {:?}, using defaults", e);
        return TimerConfig::default();
    }

    info!(
        "Config loaded: tick={}ms input={} presenter={}",
        config.tick_ms,
        input_name(config.input),
        presenter_name(config.display.presenter)
    );
    config
}

fn input_name(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Buttons => "buttons",
        InputMode::ButtonsPolled => "buttons-polled",
        InputMode::Rotary => "rotary",
    }
}

fn presenter_name(kind: PresenterKind) -> &'static str {
    match kind {
        PresenterKind::Oled => "oled",
        PresenterKind::Log => "log",
    }
}
