//! Wi-Fi bring-up and association
//!
//! The CYW43439 sits on a PIO-driven SPI bus. Its runner and the embassy-net
//! runner each get a task; `wifi_task` keeps the station joined.

use cyw43::{Control, JoinOptions};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Stack, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_time::Timer;
use linkbridge_core::config::WifiConfig;
use linkbridge_hal_rp2040::RadioPeripherals;
use rand_core::RngCore;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Pause between failed join attempts
const JOIN_RETRY_SECS: u64 = 5;

/// Sockets: one TCP connection plus DHCP and DNS
const SOCKET_COUNT: usize = 3;

type RadioSpi = PioSpi<'static, PIO0, 0, DMA_CH0>;

static RADIO_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<SOCKET_COUNT>> = StaticCell::new();

#[embassy_executor::task]
async fn cyw43_task(runner: cyw43::Runner<'static, Output<'static>, RadioSpi>) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Boot the radio and the network stack
///
/// Spawns the chip and stack runners. Joining a network is left to
/// `wifi_task`.
pub async fn start_radio(
    spawner: &Spawner,
    radio: RadioPeripherals,
) -> (Stack<'static>, Control<'static>) {
    let fw = include_bytes!("../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(radio.pwr, Level::Low);
    let cs = Output::new(radio.cs, Level::High);
    let mut pio = Pio::new(radio.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        radio.dio,
        radio.clk,
        radio.dma,
    );

    let state = RADIO_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.must_spawn(cyw43_task(runner));

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    info!("CYW43 radio initialized");

    let net_config = embassy_net::Config::dhcpv4(Default::default());
    let seed = RoscRng.next_u64();
    let (stack, runner) = embassy_net::new(
        net_device,
        net_config,
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.must_spawn(net_task(runner));

    (stack, control)
}

/// Join the configured network and rejoin whenever the link drops
#[embassy_executor::task]
pub async fn wifi_task(mut control: Control<'static>, stack: Stack<'static>, wifi: WifiConfig) -> ! {
    loop {
        let options = if wifi.password.is_empty() {
            JoinOptions::new_open()
        } else {
            JoinOptions::new(wifi.password.as_bytes())
        };

        info!("Joining {}", wifi.ssid.as_str());
        match control.join(wifi.ssid.as_str(), options).await {
            Ok(()) => {
                info!("Joined {}, waiting for DHCP", wifi.ssid.as_str());
                stack.wait_config_up().await;
                if let Some(v4) = stack.config_v4() {
                    info!("IP address: {}", v4.address);
                }

                stack.wait_link_down().await;
                warn!("Wi-Fi link lost, rejoining");
            }
            Err(err) => {
                warn!("Join failed with status {}", err.status);
                Timer::after_secs(JOIN_RETRY_SECS).await;
            }
        }
    }
}
