//! linkbridge Hardware Abstraction Layer
//!
//! Traits for the few hardware capabilities the link needs, implemented by
//! chip-specific HALs. The link physical layer is written against these so
//! it can be driven by real pins on the target and by recording mocks in
//! host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  linkbridge-core (LinkPort)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  linkbridge-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │linkbridge-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`delay::CycleDelay`] - Busy-loop delay counted in CPU cycles

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;

pub use delay::CycleDelay;
pub use gpio::{InputPin, OutputPin};
