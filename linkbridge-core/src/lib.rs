//! Board-agnostic core logic for the link bridge
//!
//! This crate contains everything between the network socket and the link
//! pins that does not depend on a specific chip:
//!
//! - Link physical layer (bit-banged 32-bit full-duplex transfer)
//! - Bridge state machine (connect, sync, stream, cool down)
//! - Session handling and retry policy
//! - Network collaborator traits
//! - Configuration type definitions

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

mod fmt;

pub mod bridge;
pub mod config;
pub mod link;
pub mod state;
pub mod traits;

pub use bridge::{CycleOutcome, CycleReport, Orchestrator};
pub use link::{LinkPort, LinkTiming, NoIndicator, Transfer};
pub use state::{BridgeEvent, BridgeState};
