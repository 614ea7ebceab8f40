//! Bridge configuration types

use heapless::String;

use super::hardware::LinkConfig;

/// Maximum Wi-Fi SSID length (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum server host name length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum request path length
pub const MAX_PATH_LEN: usize = 96;

/// Maximum User-Agent length
pub const MAX_USER_AGENT_LEN: usize = 48;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// SSID is empty
    MissingSsid,
    /// Server host is empty
    MissingHost,
    /// Path does not start with '/'
    InvalidPath,
    /// Port is zero
    InvalidPort,
    /// Two link roles share a pin
    DuplicatePin(u8),
    /// Half period, busy poll or sync limit is zero
    InvalidTiming,
}

/// Wi-Fi credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WifiConfig {
    pub ssid: String<MAX_SSID_LEN>,
    /// Empty for an open network
    pub password: String<MAX_PASSWORD_LEN>,
}

/// Document to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServerConfig {
    pub host: String<MAX_HOST_LEN>,
    pub port: u16,
    pub path: String<MAX_PATH_LEN>,
    pub user_agent: String<MAX_USER_AGENT_LEN>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let mut path = String::new();
        let _ = path.push('/');
        let mut user_agent = String::new();
        let _ = user_agent.push_str("linkbridge/0.1");
        Self {
            host: String::new(),
            port: 80,
            path,
            user_agent,
        }
    }
}

/// Retry and cooldown timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryConfig {
    /// Delay after a DNS failure
    pub resolve_delay_ms: u32,
    /// Delay after the first connect failure in a row
    pub connect_delay_ms: u32,
    /// Delay after repeated connect failures or a failed request write
    pub repeated_connect_delay_ms: u32,
    /// Countdown steps logged during cooldown
    pub cooldown_steps: u8,
    /// Delay per countdown step
    pub cooldown_step_ms: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            resolve_delay_ms: 1000,
            connect_delay_ms: 1000,
            repeated_connect_delay_ms: 4000,
            cooldown_steps: 3,
            cooldown_step_ms: 1000,
        }
    }
}

/// Complete bridge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    pub wifi: WifiConfig,
    pub server: ServerConfig,
    pub link: LinkConfig,
    pub retry: RetryConfig,
}

impl BridgeConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wifi.ssid.is_empty() {
            return Err(ConfigError::MissingSsid);
        }
        if self.server.host.is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if !self.server.path.starts_with('/') {
            return Err(ConfigError::InvalidPath);
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        let link = &self.link;
        if link.half_period_cycles == 0 || link.busy_poll_limit == 0 || link.sync_attempt_limit == 0
        {
            return Err(ConfigError::InvalidTiming);
        }

        for (i, a) in link.pins().enumerate() {
            if link.pins().skip(i + 1).any(|b| b.pin == a.pin) {
                return Err(ConfigError::DuplicatePin(a.pin));
            }
        }

        Ok(())
    }
}
