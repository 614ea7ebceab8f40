//! Inter-task communication
//!
//! The link is configured once by the init task and handed to the bridge
//! task, which owns it from then on.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use crate::tasks::BridgeLink;

/// Configured link port, idle high, ready for the bridge
pub static LINK_READY: Signal<CriticalSectionRawMutex, BridgeLink> = Signal::new();

/// Completed bridge cycles (successful or not)
pub static CYCLES: AtomicU32 = AtomicU32::new(0);

/// Payload bytes read from the server and framed onto the link
pub static BYTES_FORWARDED: AtomicU32 = AtomicU32::new(0);
