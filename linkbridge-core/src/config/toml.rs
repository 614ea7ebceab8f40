//! Minimal `bridge.toml` parser
//!
//! Handles only the subset the bridge configuration needs. It does NOT
//! support the full TOML spec.
//!
//! Supported:
//! - `key = value` pairs (string, integer, boolean)
//! - `[section]` headers
//! - Comments (`# ...`), including after a value
//!
//! NOT supported:
//! - Arrays, inline tables, multi-line strings, dotted keys
//!
//! Keys that are not recognised are ignored so a newer config still boots
//! an older firmware.

use heapless::String;

use super::hardware::{CollisionPolicy, PinConfig};
use super::types::BridgeConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String value does not fit its field
    TooLong,
    /// Pin string not understood or not allowed on this board
    InvalidPin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Wifi,
    Server,
    Link,
    Retry,
}

/// Parse a configuration using the generic `gpioN` pin syntax
pub fn parse_config(input: &str) -> Result<BridgeConfig, ParseError> {
    parse_config_with(input, parse_pin)
}

/// Parse a configuration with a board-specific pin parser
///
/// Values not present in `input` keep their defaults.
pub fn parse_config_with<F>(input: &str, pin: F) -> Result<BridgeConfig, ParseError>
where
    F: Fn(&str) -> Option<PinConfig>,
{
    let mut config = BridgeConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config, &pin)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "wifi" => Ok(Section::Wifi),
        "server" => Ok(Section::Server),
        "link" => Ok(Section::Link),
        "retry" => Ok(Section::Retry),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split a `key = value` line, dropping any trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Cut at the first '#' that is not inside a quoted string
fn strip_comment(value: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return value[..i].trim_end(),
            _ => {}
        }
    }
    value
}

/// Strip surrounding quotes; bare words are accepted as-is
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    // Allow 10_000 style separators
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_collision_policy(value: &str) -> Result<CollisionPolicy, ParseError> {
    match parse_string(value) {
        "skip" => Ok(CollisionPolicy::Skip),
        "send" => Ok(CollisionPolicy::Send),
        _ => Err(ParseError::InvalidValue),
    }
}

fn copy_str<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let mut out = String::new();
    out.push_str(parse_string(value))
        .map_err(|_| ParseError::TooLong)?;
    Ok(out)
}

/// Parse a pin string like "gpio15", "!gpio15", "^gpio17" or "^!gpio17"
///
/// Only the syntax is checked; board limits are up to the caller.
pub fn parse_pin(value: &str) -> Option<PinConfig> {
    let mut s = value.trim();
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin = s.strip_prefix("gpio")?.parse().ok()?;
    Some(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

fn apply_value<F>(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BridgeConfig,
    pin: &F,
) -> Result<(), ParseError>
where
    F: Fn(&str) -> Option<PinConfig>,
{
    let parse_pin_value = |v: &str| pin(parse_string(v)).ok_or(ParseError::InvalidPin);

    match section {
        Section::Root => {}
        Section::Wifi => match key {
            "ssid" => config.wifi.ssid = copy_str(value)?,
            "password" => config.wifi.password = copy_str(value)?,
            _ => {}
        },
        Section::Server => match key {
            "host" => config.server.host = copy_str(value)?,
            "port" => config.server.port = parse_int(value)?,
            "path" => config.server.path = copy_str(value)?,
            "user_agent" => config.server.user_agent = copy_str(value)?,
            _ => {}
        },
        Section::Link => {
            let link = &mut config.link;
            match key {
                "clock_pin" => link.clock_pin = parse_pin_value(value)?,
                "data_out_pin" => link.data_out_pin = parse_pin_value(value)?,
                "data_in_pin" => link.data_in_pin = parse_pin_value(value)?,
                "busy_pin" => link.busy_pin = parse_pin_value(value)?,
                "indicator_pin" => {
                    link.indicator_pin = match parse_string(value) {
                        "none" | "" => None,
                        _ => Some(parse_pin_value(value)?),
                    }
                }
                "half_period_cycles" => link.half_period_cycles = parse_int(value)?,
                "busy_poll_limit" => link.busy_poll_limit = parse_int(value)?,
                "busy_active_high" => link.busy_active_high = parse_bool(value)?,
                "sync_attempt_limit" => link.sync_attempt_limit = parse_int(value)?,
                "collision_policy" => link.collision_policy = parse_collision_policy(value)?,
                _ => {}
            }
        }
        Section::Retry => {
            let retry = &mut config.retry;
            match key {
                "resolve_delay_ms" => retry.resolve_delay_ms = parse_int(value)?,
                "connect_delay_ms" => retry.connect_delay_ms = parse_int(value)?,
                "repeated_connect_delay_ms" => retry.repeated_connect_delay_ms = parse_int(value)?,
                "cooldown_steps" => retry.cooldown_steps = parse_int(value)?,
                "cooldown_step_ms" => retry.cooldown_step_ms = parse_int(value)?,
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LinkConfig, RetryConfig};

    const FULL: &str = r#"
# Bridge configuration
[wifi]
ssid = "home"
password = "hunter2 # not a comment"

[server]
host = "someserver"
port = 8080
path = "/test.txt"   # document to fetch
user_agent = "linkbridge/0.1"

[link]
clock_pin = "gpio2"
data_out_pin = "!gpio3"
data_in_pin = "^gpio4"
busy_pin = "gpio5"
indicator_pin = "none"
half_period_cycles = 128
busy_poll_limit = 10_000
busy_active_high = false
sync_attempt_limit = 500
collision_policy = "send"

[retry]
resolve_delay_ms = 2000
connect_delay_ms = 1500
repeated_connect_delay_ms = 8000
cooldown_steps = 5
cooldown_step_ms = 500
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FULL).unwrap();

        assert_eq!(config.wifi.ssid.as_str(), "home");
        assert_eq!(config.wifi.password.as_str(), "hunter2 # not a comment");

        assert_eq!(config.server.host.as_str(), "someserver");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.path.as_str(), "/test.txt");
        assert_eq!(config.server.user_agent.as_str(), "linkbridge/0.1");

        let link = &config.link;
        assert_eq!(link.clock_pin, PinConfig::new(2));
        assert_eq!(link.data_out_pin, PinConfig::inverted(3));
        assert_eq!(
            link.data_in_pin,
            PinConfig {
                pin: 4,
                inverted: false,
                pull_up: true
            }
        );
        assert_eq!(link.busy_pin.pin, 5);
        assert_eq!(link.indicator_pin, None);
        assert_eq!(link.half_period_cycles, 128);
        assert_eq!(link.busy_poll_limit, 10_000);
        assert!(!link.busy_active_high);
        assert_eq!(link.sync_attempt_limit, 500);
        assert_eq!(link.collision_policy, CollisionPolicy::Send);

        assert_eq!(
            config.retry,
            RetryConfig {
                resolve_delay_ms: 2000,
                connect_delay_ms: 1500,
                repeated_connect_delay_ms: 8000,
                cooldown_steps: 5,
                cooldown_step_ms: 500,
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quoted_hash_then_comment() {
        let config = parse_config("[wifi]\nssid = \"home\"\npassword = \"ab#cd\" # home\n").unwrap();
        assert_eq!(config.wifi.password.as_str(), "ab#cd");

        let config = parse_config("[server]\nhost = \"a#b\"#c\npath = \"/x\" # \"quoted\" note\n").unwrap();
        assert_eq!(config.server.host.as_str(), "a#b");
        assert_eq!(config.server.path.as_str(), "/x");
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("80 # http"), "80");
        assert_eq!(strip_comment("\"#\""), "\"#\"");
        assert_eq!(strip_comment("\"a\" # \"b # c\""), "\"a\"");
        assert_eq!(strip_comment("true"), "true");
    }

    #[test]
    fn test_missing_values_keep_defaults() {
        let config = parse_config("[wifi]\nssid = \"x\"\n[server]\nhost = \"h\"\n").unwrap();
        assert_eq!(config.server.port, 80);
        assert_eq!(config.server.path.as_str(), "/");
        assert_eq!(config.link, LinkConfig::default());
        assert_eq!(config.retry, RetryConfig::default());
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("gpio11"), Some(PinConfig::new(11)));
        assert_eq!(parse_pin("!gpio12"), Some(PinConfig::inverted(12)));

        let pin = parse_pin("^!gpio5").unwrap();
        assert_eq!(pin.pin, 5);
        assert!(pin.inverted);
        assert!(pin.pull_up);

        assert_eq!(parse_pin("pin11"), None);
        assert_eq!(parse_pin("gpio"), None);
        assert_eq!(parse_pin("gpio300"), None);
    }

    #[test]
    fn test_invalid_pin_rejected() {
        let input = "[link]\nclock_pin = \"clk\"\n";
        assert_eq!(parse_config(input), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_board_pin_parser_rejects() {
        // Board parser that refuses anything above gpio20
        let board = |s: &str| parse_pin(s).filter(|p| p.pin <= 20);
        assert!(parse_config_with("[link]\nbusy_pin = \"gpio20\"\n", board).is_ok());
        assert_eq!(
            parse_config_with("[link]\nbusy_pin = \"gpio23\"\n", board),
            Err(ParseError::InvalidPin)
        );
    }

    #[test]
    fn test_invalid_section_and_values() {
        assert_eq!(parse_config("[stepper]\n"), Err(ParseError::InvalidSection));
        assert_eq!(
            parse_config("[server]\nport = 70000\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\nbusy_active_high = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\ncollision_policy = \"drop\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_string_too_long() {
        let input = "[wifi]\nssid = \"0123456789012345678901234567890123456789\"\n";
        assert_eq!(parse_config(input), Err(ParseError::TooLong));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[server]\nhost = \"h\"\ntimeout_ms = 5\n").unwrap();
        assert_eq!(config.server.host.as_str(), "h");
    }
}
