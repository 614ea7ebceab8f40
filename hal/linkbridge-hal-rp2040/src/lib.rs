//! RP2040-specific HAL for the link bridge
//!
//! This crate provides RP2040 implementations of the shared
//! `linkbridge-hal` traits, plus board-specific functionality:
//!
//! - Link pin wrappers over `embassy_rp::gpio` with active-low support
//! - Cycle-counted busy-loop delay
//! - Config-driven pin allocation that keeps the Pico W radio pins reserved

#![no_std]

pub mod delay;
pub mod gpio;
pub mod pins;

pub use delay::{CortexMDelay, CPU_HZ};
pub use gpio::{parse_pin_string, LinkInput, LinkOutput};
pub use pins::{PinBank, PinError, RadioPeripherals};
