//! Bridge orchestration
//!
//! Drives one network session at a time through the state machine:
//!
//! ```text
//! CONNECTING ──RequestSent──▶ SYNCING ──PeerSynced──▶ STREAMING
//!   ▲  │                        │                        │
//!   │  └─ resolve/connect/      └─SyncTimeout─┐  StreamEnded
//!   │     request failure,                    ▼          │
//!   │     retry delay                      COOLDOWN ◀────┘
//!   └──────────────CooldownElapsed────────────┘
//! ```

pub mod orchestrator;
pub mod retry;
pub mod session;

pub use orchestrator::{CycleOutcome, CycleReport, Orchestrator};
pub use retry::RetryPolicy;
pub use session::{LinkSession, ReadEnd, SessionStats, READ_BUFFER_LEN};
