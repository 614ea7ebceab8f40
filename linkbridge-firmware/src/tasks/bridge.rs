//! Bridge task
//!
//! Waits for the link port, then runs the orchestrator forever, counting
//! cycles and bytes for the heartbeat.

use core::ops::ControlFlow;

use defmt::*;
use embassy_net::Stack;
use embassy_time::Delay;
use linkbridge_core::config::BridgeConfig;
use linkbridge_core::Orchestrator;
use portable_atomic::Ordering;

use crate::channels::{BYTES_FORWARDED, CYCLES, LINK_READY};
use crate::net::EmbassyNetwork;

#[embassy_executor::task]
pub async fn bridge_task(stack: Stack<'static>, config: BridgeConfig) {
    let link = LINK_READY.wait().await;
    info!("Bridge task started");

    let network = EmbassyNetwork::new(stack);
    let mut orchestrator = Orchestrator::new(network, link, Delay, config);

    orchestrator
        .run(|report| {
            CYCLES.fetch_add(1, Ordering::Relaxed);
            BYTES_FORWARDED.fetch_add(report.stats.bytes, Ordering::Relaxed);
            ControlFlow::Continue(())
        })
        .await;
}
