//! Build script for countdown-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates timer.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pins wired to fixed functions on the board (buzzer, display SPI)
const RESERVED_PINS: [i64; 3] = [5, 10, 11];

/// Recognised keys per section; "" is the root table
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("", &["tick_ms", "input"]),
    ("display", &["presenter", "dc_pin", "cs_pin", "rst_pin", "spi_frequency"]),
    ("keys", &["primary_pin", "secondary_pin", "debounce_ms", "adjust_s"]),
    ("blink", &["show_ms", "hide_ms"]),
    ("buzzer", &["frequency", "duty", "on_ms", "off_ms"]),
    ("rotary", &["a_pin", "b_pin", "fine_limit", "fine_step_s", "coarse_step_s"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate timer.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=timer.toml");

    let config_path = Path::new("timer.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read timer.toml", &[e.to_string()]),
    };

    let config: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => fail(
            "Invalid TOML syntax in timer.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    check_keys(&config, &mut errors);
    check_values(&config, &mut errors);
    check_pins(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in timer.toml", &errors);
    }

    println!("cargo:warning=timer.toml validated successfully");
}

/// Report unknown sections and keys
fn check_keys(config: &toml::Table, errors: &mut Vec<String>) {
    let root_keys = KNOWN_KEYS[0].1;

    for (name, value) in config {
        match value {
            toml::Value::Table(section) => {
                let Some((_, keys)) = KNOWN_KEYS.iter().find(|(s, _)| s == name) else {
                    errors.push(format!("unknown section [{}]", name));
                    continue;
                };
                for key in section.keys() {
                    if !keys.contains(&key.as_str()) {
                        errors.push(format!("[{}] unknown key '{}'", name, key));
                    }
                }
            }
            _ if root_keys.contains(&name.as_str()) => {}
            _ => errors.push(format!("unknown key '{}'", name)),
        }
    }
}

fn get<'a>(config: &'a toml::Table, section: &str, key: &str) -> Option<&'a toml::Value> {
    if section.is_empty() {
        config.get(key)
    } else {
        config.get(section)?.as_table()?.get(key)
    }
}

fn check_range(
    config: &toml::Table,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    match get(config, section, key) {
        None => {}
        Some(toml::Value::Integer(v)) if range.contains(v) => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be an integer in {}..={}",
            section,
            key,
            range.start(),
            range.end()
        )),
    }
}

fn check_choice(
    config: &toml::Table,
    section: &str,
    key: &str,
    choices: &[&str],
    errors: &mut Vec<String>,
) {
    match get(config, section, key) {
        None => {}
        Some(toml::Value::String(s)) if choices.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!("[{}] {} must be one of {:?}", section, key, choices)),
    }
}

fn check_values(config: &toml::Table, errors: &mut Vec<String>) {
    check_range(config, "", "tick_ms", 100..=500, errors);
    check_choice(config, "", "input", &["buttons", "buttons-polled", "rotary"], errors);
    check_choice(config, "display", "presenter", &["oled", "log"], errors);
    check_range(config, "display", "spi_frequency", 1..=62_500_000, errors);
    check_range(config, "keys", "debounce_ms", 0..=1_000, errors);
    check_range(config, "keys", "adjust_s", -86_400..=86_400, errors);
    check_range(config, "blink", "show_ms", 1..=60_000, errors);
    check_range(config, "blink", "hide_ms", 1..=60_000, errors);
    check_range(config, "buzzer", "frequency", 20..=20_000, errors);
    check_range(config, "buzzer", "duty", 0..=65_535, errors);
    check_range(config, "buzzer", "on_ms", 1..=60_000, errors);
    check_range(config, "buzzer", "off_ms", 1..=60_000, errors);
    check_range(config, "rotary", "fine_limit", 0..=10_000, errors);
    check_range(config, "rotary", "fine_step_s", 1..=86_400, errors);
    check_range(config, "rotary", "coarse_step_s", 1..=86_400, errors);
}

/// Parse "gpioN" with optional "^"/"!" modifiers
fn parse_pin(value: &str) -> Option<i64> {
    let pin: i64 = value
        .trim_start_matches(['^', '!'])
        .strip_prefix("gpio")?
        .parse()
        .ok()?;
    (0..30).contains(&pin).then_some(pin)
}

fn check_pins(config: &toml::Table, errors: &mut Vec<String>) {
    const PIN_KEYS: &[(&str, &str)] = &[
        ("display", "dc_pin"),
        ("display", "cs_pin"),
        ("display", "rst_pin"),
        ("keys", "primary_pin"),
        ("keys", "secondary_pin"),
        ("rotary", "a_pin"),
        ("rotary", "b_pin"),
    ];

    for (section, key) in PIN_KEYS {
        let Some(value) = get(config, section, key) else {
            continue;
        };
        match value.as_str().and_then(parse_pin) {
            Some(pin) if RESERVED_PINS.contains(&pin) => errors.push(format!(
                "[{}] {} uses gpio{}, which is wired to the buzzer or display SPI",
                section, key, pin
            )),
            Some(_) => {}
            None => errors.push(format!(
                "[{}] {} must be a pin string like \"gpio15\" or \"^gpio15\"",
                section, key
            )),
        }
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
