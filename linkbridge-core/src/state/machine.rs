//! State machine definition

use super::events::BridgeEvent;

/// Bridge states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeState {
    /// Waiting for the network, resolving, connecting, sending the request
    #[default]
    Connecting,
    /// Exchanging sentinels until the peer echoes one back
    Syncing,
    /// Forwarding response bytes as link words
    Streaming,
    /// Connection closed, counting down before the next attempt
    Cooldown,
}

impl BridgeState {
    /// Check if a connection is open in this state
    pub fn has_connection(&self) -> bool {
        matches!(self, BridgeState::Syncing | BridgeState::Streaming)
    }

    /// Process an event and return the next state
    ///
    /// Events that do not apply to the current state leave it unchanged.
    pub fn transition(self, event: BridgeEvent) -> Self {
        use BridgeEvent::*;
        use BridgeState::*;

        match (self, event) {
            // Connecting transitions
            (Connecting, RequestSent) => Syncing,
            (Connecting, ResolveFailed) => Connecting,
            (Connecting, ConnectFailed) => Connecting,
            (Connecting, RequestFailed) => Connecting,

            // Syncing transitions
            (Syncing, PeerSynced) => Streaming,
            (Syncing, SyncTimeout) => Cooldown,

            // Streaming transitions
            (Streaming, StreamEnded) => Cooldown,

            // Cooldown transitions
            (Cooldown, CooldownElapsed) => Connecting,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = BridgeState::default();
        assert_eq!(state, BridgeState::Connecting);

        let state = state.transition(BridgeEvent::RequestSent);
        assert_eq!(state, BridgeState::Syncing);

        let state = state.transition(BridgeEvent::PeerSynced);
        assert_eq!(state, BridgeState::Streaming);

        let state = state.transition(BridgeEvent::StreamEnded);
        assert_eq!(state, BridgeState::Cooldown);

        let state = state.transition(BridgeEvent::CooldownElapsed);
        assert_eq!(state, BridgeState::Connecting);
    }

    #[test]
    fn test_connect_failures_retry() {
        for event in [
            BridgeEvent::ResolveFailed,
            BridgeEvent::ConnectFailed,
            BridgeEvent::RequestFailed,
        ] {
            assert_eq!(
                BridgeState::Connecting.transition(event),
                BridgeState::Connecting
            );
        }
    }

    #[test]
    fn test_sync_timeout_cools_down() {
        assert_eq!(
            BridgeState::Syncing.transition(BridgeEvent::SyncTimeout),
            BridgeState::Cooldown
        );
    }

    #[test]
    fn test_no_streaming_without_sync() {
        // The only way into Streaming is PeerSynced from Syncing
        let events = [
            BridgeEvent::RequestSent,
            BridgeEvent::ResolveFailed,
            BridgeEvent::ConnectFailed,
            BridgeEvent::RequestFailed,
            BridgeEvent::SyncTimeout,
            BridgeEvent::StreamEnded,
            BridgeEvent::CooldownElapsed,
        ];
        let states = [
            BridgeState::Connecting,
            BridgeState::Syncing,
            BridgeState::Cooldown,
        ];
        for state in states {
            for event in events {
                assert_ne!(state.transition(event), BridgeState::Streaming);
            }
        }
    }

    #[test]
    fn test_unrelated_events_ignored() {
        assert_eq!(
            BridgeState::Streaming.transition(BridgeEvent::PeerSynced),
            BridgeState::Streaming
        );
        assert_eq!(
            BridgeState::Cooldown.transition(BridgeEvent::RequestSent),
            BridgeState::Cooldown
        );
    }

    #[test]
    fn test_connection_states() {
        assert!(!BridgeState::Connecting.has_connection());
        assert!(BridgeState::Syncing.has_connection());
        assert!(BridgeState::Streaming.has_connection());
        assert!(!BridgeState::Cooldown.has_connection());
    }
}
