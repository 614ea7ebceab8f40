//! Link hardware configuration types
//!
//! Pin assignment and timing for the bit-banged link.

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }
}

/// What to do with a data word that happens to equal the sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollisionPolicy {
    /// Drop the word and log a warning; the console never sees it
    #[default]
    Skip,
    /// Transmit it anyway; the console reads it as idle and clears
    Send,
}

/// Link physical layer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Clock output (SC), idle high
    pub clock_pin: PinConfig,
    /// Data output (SO), idle high
    pub data_out_pin: PinConfig,
    /// Data input (SI)
    pub data_in_pin: PinConfig,
    /// Peer busy input
    pub busy_pin: PinConfig,
    /// Diagnostic LED mirroring the output bit
    pub indicator_pin: Option<PinConfig>,
    /// Busy-loop cycles spent on each clock level
    pub half_period_cycles: u32,
    /// Busy line polls before a transfer starts anyway
    pub busy_poll_limit: u32,
    /// Busy line reads high while the peer is busy
    pub busy_active_high: bool,
    /// Sentinel exchanges before sync gives up
    pub sync_attempt_limit: u32,
    /// Handling of data words equal to the sentinel
    pub collision_policy: CollisionPolicy,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            clock_pin: PinConfig::new(16),
            data_out_pin: PinConfig::new(15),
            data_in_pin: PinConfig::new(17),
            busy_pin: PinConfig::new(18),
            indicator_pin: Some(PinConfig::new(21)),
            half_period_cycles: 64,
            busy_poll_limit: 10_000,
            busy_active_high: true,
            sync_attempt_limit: 50_000,
            collision_policy: CollisionPolicy::Skip,
        }
    }
}

impl LinkConfig {
    /// All configured pins, indicator last if present
    pub fn pins(&self) -> impl Iterator<Item = PinConfig> + '_ {
        [
            self.clock_pin,
            self.data_out_pin,
            self.data_in_pin,
            self.busy_pin,
        ]
        .into_iter()
        .chain(self.indicator_pin)
    }
}
