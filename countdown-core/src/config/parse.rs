//! Minimal TOML reader for the timer configuration
//!
//! Handles only the subset the configuration file uses. It does NOT
//! support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Keys missing from the file keep their default value.

use super::hardware::{PinConfig, PresenterKind};
use super::types::{InputMode, TimerConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Keys,
    Blink,
    Buzzer,
    Rotary,
}

/// Parse TOML configuration on top of the defaults
pub fn parse_config(input: &str) -> Result<TimerConfig, ParseError> {
    let mut config = TimerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "keys" => Ok(Section::Keys),
        "blink" => Ok(Section::Blink),
        "buzzer" => Ok(Section::Buzzer),
        "rotary" => Ok(Section::Rotary),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    config: &mut TimerConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "tick_ms") => config.tick_ms = parse_int(value)?,
        (Section::Root, "input") => config.input = parse_input_mode(value)?,

        (Section::Display, "presenter") => config.display.presenter = parse_presenter(value)?,
        (Section::Display, "dc_pin") => config.display.dc_pin = parse_pin(value)?,
        (Section::Display, "cs_pin") => config.display.cs_pin = parse_pin(value)?,
        (Section::Display, "rst_pin") => config.display.rst_pin = parse_pin(value)?,
        (Section::Display, "spi_frequency") => config.display.spi_frequency = parse_int(value)?,

        (Section::Keys, "primary_pin") => config.keys.primary_pin = parse_pin(value)?,
        (Section::Keys, "secondary_pin") => config.keys.secondary_pin = parse_pin(value)?,
        (Section::Keys, "debounce_ms") => config.keys.debounce_ms = parse_int(value)?,
        (Section::Keys, "adjust_s") => config.keys.adjust_s = parse_int(value)?,

        (Section::Blink, "show_ms") => config.blink.show_ms = parse_int(value)?,
        (Section::Blink, "hide_ms") => config.blink.hide_ms = parse_int(value)?,

        (Section::Buzzer, "frequency") => config.buzzer.frequency = parse_int(value)?,
        (Section::Buzzer, "duty") => config.buzzer.duty = parse_int(value)?,
        (Section::Buzzer, "on_ms") => config.buzzer.on_ms = parse_int(value)?,
        (Section::Buzzer, "off_ms") => config.buzzer.off_ms = parse_int(value)?,

        (Section::Rotary, "a_pin") => config.rotary.a_pin = parse_pin(value)?,
        (Section::Rotary, "b_pin") => config.rotary.b_pin = parse_pin(value)?,
        (Section::Rotary, "fine_limit") => config.rotary.fine_limit = parse_int(value)?,
        (Section::Rotary, "fine_step_s") => config.rotary.fine_step_s = parse_int(value)?,
        (Section::Rotary, "coarse_step_s") => config.rotary.coarse_step_s = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Drop a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for ch in value.chars().filter(|&c| c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    PinConfig::parse(parse_string(value)).ok_or(ParseError::InvalidPin)
}

fn parse_input_mode(value: &str) -> Result<InputMode, ParseError> {
    match parse_string(value) {
        "buttons" => Ok(InputMode::Buttons),
        "buttons-polled" | "polled" => Ok(InputMode::ButtonsPolled),
        "rotary" => Ok(InputMode::Rotary),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_presenter(value: &str) -> Result<PresenterKind, ParseError> {
    match parse_string(value) {
        "oled" => Ok(PresenterKind::Oled),
        "log" => Ok(PresenterKind::Log),
        _ => Err(ParseError::InvalidValue),
    }
}
