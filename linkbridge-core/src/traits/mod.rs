//! Collaborator traits
//!
//! These traits define the interface between the bridge logic and the
//! board's network stack.

pub mod net;

pub use net::{Connection, NetError, Network};
