//! Cycle-counted delays
//!
//! The link's bit period is far shorter than a scheduler tick, so it is timed
//! by spinning the CPU. Implementations must not yield.

/// Busy-loop delay measured in CPU cycles
pub trait CycleDelay {
    /// Spin for at least `cycles` CPU cycles
    fn delay_cycles(&mut self, cycles: u32);
}

impl<D: CycleDelay + ?Sized> CycleDelay for &mut D {
    fn delay_cycles(&mut self, cycles: u32) {
        (**self).delay_cycles(cycles);
    }
}
