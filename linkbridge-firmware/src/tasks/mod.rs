//! Embassy async tasks
//!
//! Each task runs independently; the link port is handed from the init task
//! to the bridge task through `channels::LINK_READY`.

pub mod bridge;
pub mod link_init;
pub mod wifi;

pub use bridge::bridge_task;
pub use link_init::{link_init_task, BridgeLink};
pub use wifi::{start_radio, wifi_task};
