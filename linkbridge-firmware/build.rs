//! Build script for linkbridge-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Checks that the CYW43439 firmware blobs are present
//! - Validates bridge.toml at compile time

use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Blobs loaded into the Wi-Fi chip, relative to this crate
const CYW43_BLOBS: [&str; 2] = ["cyw43-firmware/43439A0.bin", "cyw43-firmware/43439A0_clm.bin"];

/// GPIOs wired to the radio on the Pico W
const RADIO_PINS: [i64; 4] = [23, 24, 25, 29];

fn main() {
    setup_linker();
    check_radio_firmware();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Fail early with a readable message instead of an include_bytes! error
fn check_radio_firmware() {
    let missing: Vec<String> = CYW43_BLOBS
        .iter()
        .inspect(|blob| println!("cargo:rerun-if-changed={}", blob))
        .filter(|blob| !Path::new(blob).exists())
        .map(|blob| format!("missing {}", blob))
        .collect();

    if !missing.is_empty() {
        let mut lines = missing;
        lines.push("Copy 43439A0.bin and 43439A0_clm.bin from the".to_string());
        lines.push("embassy-rs cyw43-firmware directory.".to_string());
        fail("CYW43 firmware blobs not found", &lines);
    }
}

/// Print a boxed error and abort the build
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| format_error_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Format one error line with box drawing
fn format_error_line(line: &str) -> String {
    let truncated = if line.len() > 62 {
        format!("{}...", &line[..59])
    } else {
        line.to_string()
    };
    format!("║  • {:<62} ║", truncated)
}

/// Validate bridge.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=bridge.toml");

    let config_path = Path::new("bridge.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(
            "Failed to read bridge.toml",
            &[e.to_string(), "The firmware embeds bridge.toml at build time.".to_string()],
        ),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in bridge.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    validate_wifi(&config, &mut errors);
    validate_server(&config, &mut errors);
    validate_link(&config, &mut errors);
    validate_retry(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in bridge.toml", &errors);
    }

    println!("cargo:warning=bridge.toml validated successfully");
}

fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => {
            errors.push(format!("Missing [{}] section", name));
            None
        }
    }
}

fn require_string(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    max_len: usize,
    errors: &mut Vec<String>,
) -> Option<String> {
    match table.get(key) {
        Some(toml::Value::String(s)) if s.is_empty() => {
            errors.push(format!("[{}] '{}' cannot be empty", section, key));
            None
        }
        Some(toml::Value::String(s)) if s.len() > max_len => {
            errors.push(format!("[{}] '{}' longer than {} bytes", section, key, max_len));
            None
        }
        Some(toml::Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("[{}] '{}' must be a string", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

fn check_range(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if !range.contains(v) => errors.push(format!(
            "[{}] {} must be {}-{}",
            section,
            key,
            range.start(),
            range.end()
        )),
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn validate_wifi(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(wifi) = section(config, "wifi", errors) else {
        return;
    };

    require_string(wifi, "wifi", "ssid", 32, errors);

    if let Some(toml::Value::String(password)) = wifi.get("password") {
        if password.len() > 64 {
            errors.push("[wifi] password longer than 64 bytes".to_string());
        }
    }
}

fn validate_server(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(server) = section(config, "server", errors) else {
        return;
    };

    require_string(server, "server", "host", 64, errors);
    check_range(server, "server", "port", 1..=65535, errors);

    if let Some(toml::Value::String(path)) = server.get("path") {
        if !path.starts_with('/') {
            errors.push("[server] path must start with '/'".to_string());
        }
        if path.len() > 96 {
            errors.push("[server] path longer than 96 bytes".to_string());
        }
    }
}

/// Parse "gpioN" with optional '!' and '^' modifiers, returning N
fn pin_number(value: &str) -> Option<i64> {
    let number = value.trim_start_matches(['!', '^']).strip_prefix("gpio")?;
    number.parse().ok()
}

fn validate_link(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(link) = section(config, "link", errors) else {
        return;
    };

    let mut used = HashSet::new();
    for key in ["clock_pin", "data_out_pin", "data_in_pin", "busy_pin", "indicator_pin"] {
        let value = match link.get(key) {
            Some(toml::Value::String(v)) => v,
            Some(_) => {
                errors.push(format!("[link] {} must be a pin string", key));
                continue;
            }
            // Unset pins keep their defaults
            None => continue,
        };

        if key == "indicator_pin" && value == "none" {
            continue;
        }

        match pin_number(value) {
            Some(pin) if !(0..30).contains(&pin) => {
                errors.push(format!("[link] {} '{}' is not a GPIO (0-29)", key, value))
            }
            Some(pin) if RADIO_PINS.contains(&pin) => errors.push(format!(
                "[link] {} '{}' is wired to the Wi-Fi chip",
                key, value
            )),
            Some(pin) => {
                if !used.insert(pin) {
                    errors.push(format!("[link] gpio{} used more than once", pin));
                }
            }
            None => errors.push(format!(
                "[link] {} '{}' must look like \"gpio15\" or \"!gpio15\"",
                key, value
            )),
        }
    }

    check_range(link, "link", "half_period_cycles", 1..=u32::MAX as i64, errors);
    check_range(link, "link", "busy_poll_limit", 1..=u32::MAX as i64, errors);
    check_range(link, "link", "sync_attempt_limit", 1..=u32::MAX as i64, errors);

    if let Some(v) = link.get("busy_active_high") {
        if !v.is_bool() {
            errors.push("[link] busy_active_high must be true or false".to_string());
        }
    }

    if let Some(v) = link.get("collision_policy") {
        if !matches!(v.as_str(), Some("skip") | Some("send")) {
            errors.push("[link] collision_policy must be 'skip' or 'send'".to_string());
        }
    }
}

fn validate_retry(config: &toml::Value, errors: &mut Vec<String>) {
    // Retry timing is optional
    let Some(toml::Value::Table(retry)) = config.get("retry") else {
        return;
    };

    for key in ["resolve_delay_ms", "connect_delay_ms", "repeated_connect_delay_ms", "cooldown_step_ms"] {
        check_range(retry, "retry", key, 0..=600_000, errors);
    }
    check_range(retry, "retry", "cooldown_steps", 0..=255, errors);
}
