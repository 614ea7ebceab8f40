//! Link physical layer
//!
//! Bit-banged full-duplex transfer of one 32-bit word over the console's
//! serial link port, with the bridge as clock master.
//!
//! ```text
//!        bit 31 (MSB)     bit 30              bit 0
//! SC  ‾‾‾\____/‾‾‾‾\____/‾‾‾‾ ... ‾‾‾\____/‾‾‾‾‾‾‾‾
//! SO  ===X=========X========= ... ===X============‾‾  (idle high)
//! SI  ---------^---------^--- ... ---------^-------
//!              sampled on each rising edge
//! ```
//!
//! Each clock level is held for `half_period_cycles` of busy-looping. The
//! whole transfer runs without yielding, so a word takes 32 bit periods of
//! CPU time plus the busy wait.

mod port;

pub use port::{LinkPins, LinkPort, LinkTiming, NoIndicator, Transfer};
