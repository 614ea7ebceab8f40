//! Bridge orchestrator task body

use core::ops::ControlFlow;

use embedded_hal_async::delay::DelayNs;
use linkbridge_protocol::{HttpGet, WordExchange};

use super::retry::RetryPolicy;
use super::session::{LinkSession, ReadEnd, SessionStats};
use crate::config::BridgeConfig;
use crate::fmt::{debug, error, info, warn};
use crate::state::{BridgeEvent, BridgeState};
use crate::traits::Network;

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    ResolveFailed,
    ConnectFailed,
    RequestFailed,
    /// Peer never echoed the sentinel
    SyncTimeout,
    /// Response forwarded until the connection ended
    Streamed(ReadEnd),
}

/// Summary of one pass from CONNECTING back to CONNECTING
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    /// Delay taken before retrying; zero after a cooldown
    pub retry_delay_ms: u32,
    pub stats: SessionStats,
}

impl CycleReport {
    fn retry(outcome: CycleOutcome, retry_delay_ms: u32) -> Self {
        Self {
            outcome,
            retry_delay_ms,
            stats: SessionStats::default(),
        }
    }
}

/// Owns the network, the link and the current session
pub struct Orchestrator<N, L, D> {
    network: N,
    link: L,
    delay: D,
    config: BridgeConfig,
    retry: RetryPolicy,
    state: BridgeState,
}

impl<N, L, D> Orchestrator<N, L, D>
where
    N: Network,
    L: WordExchange,
    D: DelayNs,
{
    pub fn new(network: N, link: L, delay: D, config: BridgeConfig) -> Self {
        let retry = RetryPolicy::new(config.retry);
        Self {
            network,
            link,
            delay,
            config,
            retry,
            state: BridgeState::Connecting,
        }
    }

    /// Current state; always `Connecting` between cycles
    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (N, L, D) {
        (self.network, self.link, self.delay)
    }

    /// Run cycles back to back, handing each report to `on_cycle`
    ///
    /// Stops only when `on_cycle` breaks; the firmware never does.
    pub async fn run<F>(&mut self, mut on_cycle: F)
    where
        F: FnMut(&CycleReport) -> ControlFlow<()>,
    {
        loop {
            let report = self.run_cycle().await;
            debug!("Cycle finished: {}", report);
            if on_cycle(&report).is_break() {
                return;
            }
        }
    }

    /// Run from CONNECTING until the state machine is back in CONNECTING
    ///
    /// A failed connection attempt returns after its retry delay. A
    /// successful one returns after the cooldown.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let Self {
            network,
            link,
            delay,
            config,
            retry,
            state,
        } = self;
        debug_assert_eq!(*state, BridgeState::Connecting);

        // CONNECTING
        network.wait_ready().await;
        info!("Network ready, connecting to server");

        let addr = match network.resolve(&config.server.host).await {
            Ok(addr) => addr,
            Err(e) => {
                let ms = retry.on_resolve_failed();
                error!("DNS lookup failed: {}", e);
                *state = state.transition(BridgeEvent::ResolveFailed);
                delay.delay_ms(ms).await;
                return CycleReport::retry(CycleOutcome::ResolveFailed, ms);
            }
        };
        let [a, b, c, d] = addr.octets();
        info!("DNS lookup succeeded. IP={}.{}.{}.{}", a, b, c, d);

        let connection = match network.connect(addr, config.server.port).await {
            Ok(connection) => connection,
            Err(e) => {
                let ms = retry.on_connect_failed();
                error!("Socket connect failed: {}", e);
                *state = state.transition(BridgeEvent::ConnectFailed);
                delay.delay_ms(ms).await;
                return CycleReport::retry(CycleOutcome::ConnectFailed, ms);
            }
        };
        retry.on_connected();
        info!("Connected");

        let mut session = LinkSession::new(connection);

        let request = HttpGet::new(
            &config.server.host,
            config.server.port,
            &config.server.path,
            &config.server.user_agent,
        );
        let sent = match request.render() {
            Ok(text) => session.send_request(text.as_bytes()).await.is_ok(),
            Err(e) => {
                error!("Cannot build request: {}", e);
                false
            }
        };
        if !sent {
            let ms = retry.on_request_failed();
            error!("Socket send failed");
            session.close().await;
            *state = state.transition(BridgeEvent::RequestFailed);
            delay.delay_ms(ms).await;
            return CycleReport::retry(CycleOutcome::RequestFailed, ms);
        }
        info!("Request sent");
        *state = state.transition(BridgeEvent::RequestSent);

        // SYNCING
        let limit = config.link.sync_attempt_limit;
        let outcome = if session.sync(link, limit) {
            info!(
                "Link synced after {=u32} exchanges",
                session.stats().sync_attempts
            );
            *state = state.transition(BridgeEvent::PeerSynced);

            // STREAMING
            let end = session.stream(link, config.link.collision_policy).await;
            *state = state.transition(BridgeEvent::StreamEnded);
            CycleOutcome::Streamed(end)
        } else {
            warn!("Peer did not sync within {=u32} exchanges", limit);
            *state = state.transition(BridgeEvent::SyncTimeout);
            CycleOutcome::SyncTimeout
        };

        // COOLDOWN
        let stats = session.close().await;
        if let CycleOutcome::Streamed(end) = outcome {
            info!(
                "Stream ended ({}): {=u32} bytes, {=u32} words, {=u32} collisions",
                end, stats.bytes, stats.words, stats.collisions
            );
        }

        for step in (0..config.retry.cooldown_steps).rev() {
            info!("{=u8}...", step);
            delay.delay_ms(config.retry.cooldown_step_ms).await;
        }
        info!("Starting again");
        *state = state.transition(BridgeEvent::CooldownElapsed);

        CycleReport {
            outcome,
            retry_delay_ms: 0,
            stats,
        }
    }
}
