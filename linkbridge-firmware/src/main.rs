//! linkbridge - Wi-Fi to link-port bridge firmware
//!
//! Main firmware binary for the Raspberry Pi Pico W. Fetches one document
//! over HTTP and clocks it into a handheld console's link port, four bytes
//! per transfer, then does it again.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use portable_atomic::Ordering;
use {defmt_rtt as _, panic_probe as _};

use linkbridge_hal_rp2040::PinBank;

mod channels;
mod config;
mod net;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit bridge.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../bridge.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("linkbridge firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let (bank, radio) = PinBank::split(p);

    let Some(config) = config::load(EMBEDDED_CONFIG) else {
        // Nothing useful can run without a valid config
        loop {
            error!("No usable configuration, bridge halted");
            Timer::after_secs(60).await;
        }
    };

    // Link lines go idle high before the radio starts booting
    spawner.must_spawn(tasks::link_init_task(bank, config.link));

    let (stack, control) = tasks::start_radio(&spawner, radio).await;
    spawner.must_spawn(tasks::wifi_task(control, stack, config.wifi.clone()));
    spawner.must_spawn(tasks::bridge_task(stack, config));

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        info!(
            "Heartbeat: {} cycles, {} bytes forwarded",
            channels::CYCLES.load(Ordering::Relaxed),
            channels::BYTES_FORWARDED.load(Ordering::Relaxed)
        );
    }
}
