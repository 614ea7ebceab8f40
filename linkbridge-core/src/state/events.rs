//! Events that trigger state transitions

/// Outcomes that drive the bridge from one state to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeEvent {
    // Connecting
    /// Connected and the request went out
    RequestSent,
    /// Server name did not resolve
    ResolveFailed,
    /// TCP connect failed
    ConnectFailed,
    /// Writing the request failed
    RequestFailed,

    // Syncing
    /// Peer echoed the sentinel
    PeerSynced,
    /// Peer never echoed the sentinel within the attempt limit
    SyncTimeout,

    // Streaming
    /// Connection closed or a read failed
    StreamEnded,

    // Cooldown
    /// Countdown finished
    CooldownElapsed,
}

impl BridgeEvent {
    /// Check if this event means the connection attempt failed
    pub fn is_connect_failure(&self) -> bool {
        matches!(
            self,
            BridgeEvent::ResolveFailed | BridgeEvent::ConnectFailed | BridgeEvent::RequestFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_failures() {
        assert!(BridgeEvent::ResolveFailed.is_connect_failure());
        assert!(BridgeEvent::ConnectFailed.is_connect_failure());
        assert!(BridgeEvent::RequestFailed.is_connect_failure());
        assert!(!BridgeEvent::SyncTimeout.is_connect_failure());
        assert!(!BridgeEvent::StreamEnded.is_connect_failure());
    }
}
