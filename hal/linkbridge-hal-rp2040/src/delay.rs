//! Cycle-counted delay on the Cortex-M0+ core

use linkbridge_hal::CycleDelay;

/// Default system clock after `embassy_rp::init`
pub const CPU_HZ: u32 = 125_000_000;

/// Spin delay backed by `cortex_m::asm::delay`
///
/// Never yields to the executor, so the caller holds the core for the whole
/// duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CortexMDelay;

impl CycleDelay for CortexMDelay {
    #[inline(always)]
    fn delay_cycles(&mut self, cycles: u32) {
        cortex_m::asm::delay(cycles);
    }
}
