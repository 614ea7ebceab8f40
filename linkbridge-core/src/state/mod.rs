//! Bridge state machine
//!
//! The orchestrator's behavior is a function of the current state and the
//! outcome of the last network or link operation. The state machine is
//! explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::BridgeEvent;
pub use machine::BridgeState;
