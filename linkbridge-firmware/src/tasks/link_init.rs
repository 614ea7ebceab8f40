//! One-shot link setup
//!
//! Claims the configured pins, drives the link to idle and hands the port to
//! the bridge task. Runs before the radio comes up so the console never sees
//! floating lines for long.

use defmt::*;
use linkbridge_core::config::{LinkConfig, PinConfig};
use linkbridge_core::link::LinkPins;
use linkbridge_core::{LinkPort, LinkTiming};
use linkbridge_hal_rp2040::{CortexMDelay, LinkInput, LinkOutput, PinBank, PinError};

use crate::channels::LINK_READY;

/// The concrete link port used by the firmware
pub type BridgeLink =
    LinkPort<LinkOutput, LinkOutput, LinkInput, LinkInput, Option<LinkOutput>, CortexMDelay>;

#[embassy_executor::task]
pub async fn link_init_task(mut bank: PinBank, config: LinkConfig) {
    match build_link(&mut bank, &config) {
        Ok(mut link) => {
            link.idle();
            info!(
                "Link idle: half period {} cycles, busy poll limit {}",
                config.half_period_cycles, config.busy_poll_limit
            );
            LINK_READY.signal(link);
        }
        Err(e) => {
            // The bridge task waits forever without a link
            error!("Link pin setup failed: {}", e);
        }
    }
}

fn output(bank: &mut PinBank, pin: PinConfig) -> Result<LinkOutput, PinError> {
    Ok(LinkOutput::new(bank.take(pin.pin)?, pin.inverted))
}

fn input(bank: &mut PinBank, pin: PinConfig) -> Result<LinkInput, PinError> {
    Ok(LinkInput::new(bank.take(pin.pin)?, pin.inverted, pin.pull_up))
}

fn build_link(bank: &mut PinBank, config: &LinkConfig) -> Result<BridgeLink, PinError> {
    let pins = LinkPins {
        clock: output(bank, config.clock_pin)?,
        data_out: output(bank, config.data_out_pin)?,
        data_in: input(bank, config.data_in_pin)?,
        busy: input(bank, config.busy_pin)?,
        indicator: config
            .indicator_pin
            .map(|pin| output(bank, pin))
            .transpose()?,
    };

    Ok(LinkPort::new(pins, CortexMDelay, LinkTiming::from(config)))
}
