//! Link pin wrappers and pin string parsing
//!
//! The link lines are plain push-pull outputs and floating (or pulled-up)
//! inputs. Active-low wiring is handled here so the link layer only ever
//! deals in logical levels.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use linkbridge_core::config::{parse_pin, PinConfig};
use linkbridge_hal::{InputPin, OutputPin};

use crate::pins::is_reserved;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Output line driven by the bridge (clock, data out, indicator)
pub struct LinkOutput {
    pin: Output<'static>,
    inverted: bool,
}

impl LinkOutput {
    /// Configure `pin` as an output, starting at logical high (link idle)
    pub fn new(pin: Peri<'static, AnyPin>, inverted: bool) -> Self {
        let level = if inverted { Level::Low } else { Level::High };
        Self {
            pin: Output::new(pin, level),
            inverted,
        }
    }

    fn physical(&self, high: bool) -> Level {
        if high != self.inverted {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl OutputPin for LinkOutput {
    #[inline(always)]
    fn set_high(&mut self) {
        let level = self.physical(true);
        self.pin.set_level(level);
    }

    #[inline(always)]
    fn set_low(&mut self) {
        let level = self.physical(false);
        self.pin.set_level(level);
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}

/// Input line sampled by the bridge (data in, busy)
pub struct LinkInput {
    pin: Input<'static>,
    inverted: bool,
}

impl LinkInput {
    /// Configure `pin` as an input
    pub fn new(pin: Peri<'static, AnyPin>, inverted: bool, pull_up: bool) -> Self {
        let pull = if pull_up { Pull::Up } else { Pull::None };
        Self {
            pin: Input::new(pin, pull),
            inverted,
        }
    }
}

impl InputPin for LinkInput {
    #[inline(always)]
    fn is_high(&self) -> bool {
        self.pin.is_high() != self.inverted
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio15" -> pin 15
/// - "!gpio15" -> pin 15, active-low
/// - "^gpio17" -> pin 17, pull-up enabled
///
/// Modifiers may be combined in any order. Pins wired to the radio are
/// rejected.
pub fn parse_pin_string(s: &str) -> Option<PinConfig> {
    parse_pin(s).filter(|p| p.pin < GPIO_COUNT && !is_reserved(p.pin))
}
