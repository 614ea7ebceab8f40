//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills these from
//! its embedded `bridge.toml` at boot.

pub mod hardware;
pub mod toml;
pub mod types;

pub use hardware::*;
pub use toml::{parse_config, parse_config_with, parse_pin, ParseError};
pub use types::*;
