//! Build script for vernier-firmware
//!
//! - Validates vernier.toml at compile time
//! - Emits the validated settings as a `ReadoutConfig` constant
//! - Passes defmt linker arguments
//!
//! memory.x comes from embassy-stm32's `memory-x` feature.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "vernier.toml";

fn main() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");

    let config = load_config();
    let settings = validate_config(&config);
    write_config(&settings);

    println!("cargo:warning={} validated successfully", CONFIG_FILE);
}

/// Validated readout settings
struct Settings {
    view: &'static str,
    sign_placement: &'static str,
    sync_timeout_us: u32,
    refresh_period_ms: u32,
    sensor_period_ms: u32,
    invert_data: bool,
}

/// Read and parse vernier.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed={}", CONFIG_FILE);

    let config_path = Path::new(CONFIG_FILE);
    if !config_path.exists() {
        fail(
            "vernier.toml not found",
            &["The firmware requires a vernier.toml next to Cargo.toml."],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read vernier.toml", &[&e.to_string()]),
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid TOML syntax in vernier.toml", &lines)
        }
    }
}

/// Check every section and collect all problems before failing
fn validate_config(config: &toml::Value) -> Settings {
    let mut errors = Vec::new();

    let view = match string_field(config, "readout", "view", "measurement", &mut errors) {
        "measurement" => "Measurement",
        "raw_hex" => "RawHex",
        "clock" => "Clock",
        _ => {
            errors.push("[readout] view must be 'measurement', 'raw_hex' or 'clock'".to_string());
            "Measurement"
        }
    };

    let sign_placement = match string_field(config, "readout", "sign_placement", "edge", &mut errors)
    {
        "edge" => "Edge",
        "adjacent" => "Adjacent",
        _ => {
            errors.push("[readout] sign_placement must be 'edge' or 'adjacent'".to_string());
            "Edge"
        }
    };

    let sync_timeout_us = int_field(
        config,
        "readout",
        "sync_timeout_us",
        3_000,
        100..=100_000,
        &mut errors,
    );
    let refresh_period_ms = int_field(
        config,
        "display",
        "refresh_period_ms",
        20,
        1..=1_000,
        &mut errors,
    );
    let sensor_period_ms = int_field(
        config,
        "sensor",
        "period_ms",
        2_000,
        100..=3_600_000,
        &mut errors,
    );

    let invert_data = match config.get("readout").and_then(|r| r.get("invert_data")) {
        None => false,
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push("[readout] invert_data must be true or false".to_string());
            false
        }
    };

    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail("Invalid configuration in vernier.toml", &lines);
    }

    Settings {
        view,
        sign_placement,
        sync_timeout_us,
        refresh_period_ms,
        sensor_period_ms,
        invert_data,
    }
}

/// Look up `[section] key` as a string, with a default when absent
fn string_field<'a>(
    config: &'a toml::Value,
    section: &str,
    key: &str,
    default: &'a str,
    errors: &mut Vec<String>,
) -> &'a str {
    match config.get(section).and_then(|s| s.get(key)) {
        None => default,
        Some(toml::Value::String(s)) => s.as_str(),
        Some(_) => {
            errors.push(format!("[{}] {} must be a string", section, key));
            default
        }
    }
}

/// Look up `[section] key` as an integer within `range`
fn int_field(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: u32,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> u32 {
    match config.get(section).and_then(|s| s.get(key)) {
        None => default,
        Some(toml::Value::Integer(v)) if range.contains(v) => *v as u32,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            default
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            default
        }
    }
}

/// Emit `READOUT_CONFIG` into OUT_DIR
fn write_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let source = format!(
        "/// Readout settings from vernier.toml\n\
         pub const READOUT_CONFIG: ReadoutConfig = ReadoutConfig {{\n    \
             view: ViewMode::{},\n    \
             sign_placement: SignPlacement::{},\n    \
             sync_timeout_us: {},\n    \
             refresh_period_ms: {},\n    \
             sensor_period_ms: {},\n    \
             invert_data: {},\n\
         }};\n",
        settings.view,
        settings.sign_placement,
        settings.sync_timeout_us,
        settings.refresh_period_ms,
        settings.sensor_period_ms,
        settings.invert_data,
    );
    fs::write(out_dir.join("readout_config.rs"), source).unwrap();
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[&str]) -> ! {
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
