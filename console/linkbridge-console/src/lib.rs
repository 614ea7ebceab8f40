//! Console side of the link
//!
//! This crate provides:
//! - `TextConsole` trait for whatever the console prints to
//! - `Screen`, a character buffer implementing `TextConsole`
//! - `Receiver` / `ReceiverLoop`, the console's half of the link protocol
//!
//! # Architecture
//!
//! The console is the clock follower. It offers the sentinel on every
//! transfer and acts on whatever the bridge sends back:
//!
//! - sentinel: the bridge is idle or syncing, so the screen is cleared
//! - anything else: four bytes of text, printed up to the first NUL
//!
//! There is no explicit streaming mode on this side. Echoing the sentinel
//! is what lets the bridge's sync phase complete.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod backend;
pub mod receiver;
pub mod screen;

// Re-export key types
pub use backend::TextConsole;
pub use receiver::{Receiver, ReceiverEvent, ReceiverLoop, BANNER};
pub use screen::{GbaScreen, Screen, SCREEN_COLS, SCREEN_ROWS};
