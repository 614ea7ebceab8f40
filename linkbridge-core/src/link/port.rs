use linkbridge_hal::{CycleDelay, InputPin, OutputPin};
use linkbridge_protocol::{LinkWord, WordExchange, WORD_BITS};

use crate::config::LinkConfig;

/// Result of one word exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transfer {
    /// Word clocked in from the peer
    pub received: u32,
    /// The busy line never cleared within the poll limit
    pub busy_wait_expired: bool,
}

/// Timing parameters for the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkTiming {
    /// Busy-loop cycles per clock level
    pub half_period_cycles: u32,
    /// Busy polls before starting anyway
    pub busy_poll_limit: u32,
    /// Busy line reads high while the peer is busy
    pub busy_active_high: bool,
}

impl From<&LinkConfig> for LinkTiming {
    fn from(config: &LinkConfig) -> Self {
        Self {
            half_period_cycles: config.half_period_cycles,
            busy_poll_limit: config.busy_poll_limit,
            busy_active_high: config.busy_active_high,
        }
    }
}

/// Stand-in for boards without a diagnostic LED
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndicator;

impl OutputPin for NoIndicator {
    fn set_high(&mut self) {}

    fn set_low(&mut self) {}

    fn is_set_high(&self) -> bool {
        true
    }
}

/// The four link lines plus the indicator
pub struct LinkPins<Clk, So, Si, Busy, Led = NoIndicator> {
    pub clock: Clk,
    pub data_out: So,
    pub data_in: Si,
    pub busy: Busy,
    pub indicator: Led,
}

/// Bridge side of the link
///
/// Holds no state between transfers apart from a count of expired busy
/// waits.
pub struct LinkPort<Clk, So, Si, Busy, Led, D> {
    pins: LinkPins<Clk, So, Si, Busy, Led>,
    delay: D,
    timing: LinkTiming,
    busy_timeouts: u32,
}

impl<Clk, So, Si, Busy, Led, D> LinkPort<Clk, So, Si, Busy, Led, D>
where
    Clk: OutputPin,
    So: OutputPin,
    Si: InputPin,
    Busy: InputPin,
    Led: OutputPin,
    D: CycleDelay,
{
    pub fn new(pins: LinkPins<Clk, So, Si, Busy, Led>, delay: D, timing: LinkTiming) -> Self {
        Self {
            pins,
            delay,
            timing,
            busy_timeouts: 0,
        }
    }

    /// Drive clock, data out and indicator to their idle (high) level
    pub fn idle(&mut self) {
        self.pins.clock.set_high();
        self.pins.data_out.set_high();
        self.pins.indicator.set_high();
    }

    /// Exchange one word, MSB first
    ///
    /// Always clocks exactly 32 bits. If the peer still reports busy after
    /// the poll limit the transfer goes ahead and the result says so.
    pub fn exchange_word(&mut self, outgoing: u32) -> Transfer {
        let busy_wait_expired = !self.wait_not_busy();
        if busy_wait_expired {
            self.busy_timeouts = self.busy_timeouts.saturating_add(1);
        }

        let half = self.timing.half_period_cycles;
        let mut received = 0u32;

        for i in 0..WORD_BITS {
            let shift = WORD_BITS - 1 - i;
            let bit = (outgoing >> shift) & 1 == 1;

            self.pins.data_out.set_state(bit);
            self.pins.indicator.set_state(bit);

            self.pins.clock.set_low();
            self.delay.delay_cycles(half);
            self.pins.clock.set_high();

            if self.pins.data_in.is_high() {
                received |= 1 << shift;
            }
            self.delay.delay_cycles(half);
        }

        self.idle();

        Transfer {
            received,
            busy_wait_expired,
        }
    }

    /// Number of transfers that started with the peer still busy
    pub fn busy_timeouts(&self) -> u32 {
        self.busy_timeouts
    }

    /// Give back the pins and delay
    pub fn release(self) -> (LinkPins<Clk, So, Si, Busy, Led>, D) {
        (self.pins, self.delay)
    }

    fn peer_busy(&self) -> bool {
        self.pins.busy.is_high() == self.timing.busy_active_high
    }

    /// Returns false if the poll limit ran out
    fn wait_not_busy(&mut self) -> bool {
        for _ in 0..self.timing.busy_poll_limit {
            if !self.peer_busy() {
                return true;
            }
            self.delay.delay_cycles(self.timing.half_period_cycles);
        }
        !self.peer_busy()
    }
}

impl<Clk, So, Si, Busy, Led, D> WordExchange for LinkPort<Clk, So, Si, Busy, Led, D>
where
    Clk: OutputPin,
    So: OutputPin,
    Si: InputPin,
    Busy: InputPin,
    Led: OutputPin,
    D: CycleDelay,
{
    fn exchange(&mut self, outgoing: LinkWord) -> LinkWord {
        LinkWord(self.exchange_word(outgoing.raw()).received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use linkbridge_protocol::SENTINEL;
    use proptest::prelude::*;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Simulated wire shared by the mock pins
    #[derive(Default)]
    struct Wire {
        clock_high: bool,
        data_out_high: bool,
        indicator_high: bool,
        rising_edges: u32,
        falling_edges: u32,
        /// Data out level latched by the peer on each rising edge
        latched: Vec<bool>,
        /// Indicator level on each rising edge
        indicator_trace: Vec<bool>,
        peer_word: u32,
        busy_polls_left: u32,
        busy_polls: u32,
    }

    type Shared = Rc<RefCell<Wire>>;

    struct Clock(Shared);
    struct DataOut(Shared);
    struct Indicator(Shared);
    struct DataIn(Shared);
    struct Busy(Shared);

    impl OutputPin for Clock {
        fn set_high(&mut self) {
            let mut w = self.0.borrow_mut();
            if !w.clock_high {
                w.rising_edges += 1;
                let level = w.data_out_high;
                let led = w.indicator_high;
                w.latched.push(level);
                w.indicator_trace.push(led);
            }
            w.clock_high = true;
        }
        fn set_low(&mut self) {
            let mut w = self.0.borrow_mut();
            if w.clock_high {
                w.falling_edges += 1;
            }
            w.clock_high = false;
        }
        fn is_set_high(&self) -> bool {
            self.0.borrow().clock_high
        }
    }

    impl OutputPin for DataOut {
        fn set_high(&mut self) {
            self.0.borrow_mut().data_out_high = true;
        }
        fn set_low(&mut self) {
            self.0.borrow_mut().data_out_high = false;
        }
        fn is_set_high(&self) -> bool {
            self.0.borrow().data_out_high
        }
    }

    impl OutputPin for Indicator {
        fn set_high(&mut self) {
            self.0.borrow_mut().indicator_high = true;
        }
        fn set_low(&mut self) {
            self.0.borrow_mut().indicator_high = false;
        }
        fn is_set_high(&self) -> bool {
            self.0.borrow().indicator_high
        }
    }

    impl InputPin for DataIn {
        fn is_high(&self) -> bool {
            // Peer presents bit (31 - n) before the n-th rising edge
            let w = self.0.borrow();
            let index = w.rising_edges.saturating_sub(1) % WORD_BITS;
            (w.peer_word >> (WORD_BITS - 1 - index)) & 1 == 1
        }
    }

    impl InputPin for Busy {
        fn is_high(&self) -> bool {
            let mut w = self.0.borrow_mut();
            w.busy_polls += 1;
            if w.busy_polls_left > 0 {
                w.busy_polls_left -= 1;
                true
            } else {
                false
            }
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        calls: u32,
        cycles: u64,
    }

    impl CycleDelay for CountingDelay {
        fn delay_cycles(&mut self, cycles: u32) {
            self.calls += 1;
            self.cycles += cycles as u64;
        }
    }

    type MockPort = LinkPort<Clock, DataOut, DataIn, Busy, Indicator, CountingDelay>;

    fn port(timing: LinkTiming) -> (MockPort, Shared) {
        let wire: Shared = Rc::new(RefCell::new(Wire::default()));
        let pins = LinkPins {
            clock: Clock(wire.clone()),
            data_out: DataOut(wire.clone()),
            data_in: DataIn(wire.clone()),
            busy: Busy(wire.clone()),
            indicator: Indicator(wire.clone()),
        };
        let mut port = LinkPort::new(pins, CountingDelay::default(), timing);
        port.idle();
        {
            // Discard the edge produced by bringing the clock up
            let mut w = wire.borrow_mut();
            w.rising_edges = 0;
            w.latched.clear();
            w.indicator_trace.clear();
        }
        (port, wire)
    }

    fn timing() -> LinkTiming {
        LinkTiming {
            half_period_cycles: 8,
            busy_poll_limit: 100,
            busy_active_high: true,
        }
    }

    fn latched_word(bits: &[bool]) -> u32 {
        bits.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32)
    }

    #[test]
    fn test_idle_levels() {
        let (_port, wire) = port(timing());
        let w = wire.borrow();
        assert!(w.clock_high);
        assert!(w.data_out_high);
        assert!(w.indicator_high);
    }

    #[test]
    fn test_exchange_full_duplex() {
        let (mut port, wire) = port(timing());
        wire.borrow_mut().peer_word = SENTINEL.raw();

        let transfer = port.exchange_word(0x1234_5678);
        assert_eq!(transfer.received, 0xDEAD_B00F);
        assert!(!transfer.busy_wait_expired);

        let w = wire.borrow();
        assert_eq!(latched_word(&w.latched), 0x1234_5678);
        assert_eq!(w.indicator_trace, w.latched);
    }

    #[test]
    fn test_lines_return_idle_high() {
        let (mut port, wire) = port(timing());
        port.exchange_word(0);
        let w = wire.borrow();
        assert!(w.clock_high);
        assert!(w.data_out_high);
        assert!(w.indicator_high);
    }

    #[test]
    fn test_bit_period_uses_cycle_delay() {
        let (mut port, _wire) = port(timing());
        port.exchange_word(0xFFFF_0000);
        let (_, delay) = port.release();
        assert_eq!(delay.calls, 64);
        assert_eq!(delay.cycles, 64 * 8);
    }

    #[test]
    fn test_busy_wait_then_transfer() {
        let (mut port, wire) = port(timing());
        wire.borrow_mut().busy_polls_left = 5;

        let transfer = port.exchange_word(1);
        assert!(!transfer.busy_wait_expired);
        assert_eq!(wire.borrow().busy_polls, 6);
        assert_eq!(wire.borrow().rising_edges, 32);
        assert_eq!(port.busy_timeouts(), 0);
    }

    #[test]
    fn test_busy_wait_expires_but_completes() {
        let (mut port, wire) = port(timing());
        wire.borrow_mut().busy_polls_left = u32::MAX;

        let transfer = port.exchange_word(1);
        assert!(transfer.busy_wait_expired);
        assert_eq!(wire.borrow().rising_edges, 32);
        assert_eq!(port.busy_timeouts(), 1);
    }

    #[test]
    fn test_busy_active_low() {
        let mut t = timing();
        t.busy_active_high = false;
        let (mut port, wire) = port(t);
        // Busy pin reads high forever, which now means "ready"
        wire.borrow_mut().busy_polls_left = u32::MAX;

        let transfer = port.exchange_word(1);
        assert!(!transfer.busy_wait_expired);
        assert_eq!(wire.borrow().busy_polls, 1);
    }

    #[test]
    fn test_word_exchange_trait() {
        let (mut port, wire) = port(timing());
        wire.borrow_mut().peer_word = 0x4849_0000;
        assert_eq!(port.exchange(SENTINEL), LinkWord::from_bytes(*b"HI\0\0"));
    }

    proptest! {
        #[test]
        fn prop_exactly_32_pulses(outgoing in any::<u32>(), peer in any::<u32>()) {
            let (mut port, wire) = port(timing());
            wire.borrow_mut().peer_word = peer;

            let transfer = port.exchange_word(outgoing);

            let w = wire.borrow();
            prop_assert_eq!(w.rising_edges, 32);
            prop_assert_eq!(w.falling_edges, 32);
            prop_assert_eq!(latched_word(&w.latched), outgoing);
            prop_assert_eq!(transfer.received, peer);
        }
    }
}
