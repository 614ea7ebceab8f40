//! Configuration loading
//!
//! The configuration is compiled in from `bridge.toml`, which build.rs has
//! already validated. Parsing can still fail if the two disagree, so the
//! result is checked again here.

use defmt::*;
use linkbridge_core::config::{parse_config_with, BridgeConfig};
use linkbridge_hal_rp2040::parse_pin_string;

/// Parse and validate the embedded configuration
pub fn load(input: &str) -> Option<BridgeConfig> {
    let config = match parse_config_with(input, parse_pin_string) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            return None;
        }
    };

    if let Err(e) = config.validate() {
        error!("Embedded config rejected: {}", e);
        return None;
    }

    info!(
        "Config: server {}:{}{}, link clock=gpio{} so=gpio{} si=gpio{} busy=gpio{}",
        config.server.host.as_str(),
        config.server.port,
        config.server.path.as_str(),
        config.link.clock_pin.pin,
        config.link.data_out_pin.pin,
        config.link.data_in_pin.pin,
        config.link.busy_pin.pin
    );

    Some(config)
}
