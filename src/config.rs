//! System configuration parameters
//!
//! All acquisition and uplink parameters for the SmartChair.  Values are
//! compiled in; the struct is built once at boot and handed by reference
//! (or by copy of the relevant fields) to each component.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::sensors::mux::MUX_CHANNELS;

/// Core acquisition configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Pressure array ---
    /// Number of multiplexer channels wired to FSRs (swept 0..channel_count)
    pub channel_count: u8,
    /// Raw ADC value above which a channel counts as an active sensor
    pub pressure_threshold: u16,
    /// Active sensors above which the indicator switches to alert
    pub alert_active_count: u8,
    /// Multiplexer settle time after a channel switch (microseconds)
    pub settle_delay_us: u32,

    // --- Timing ---
    /// Full acquire + upload cycle cadence (milliseconds)
    pub cycle_interval_ms: u32,
    /// HTTP request timeout (milliseconds)
    pub http_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Pressure array
            channel_count: 12,
            pressure_threshold: 500,
            alert_active_count: 4,
            settle_delay_us: 1_000,

            // Timing
            cycle_interval_ms: 5_000, // 0.2 Hz
            http_timeout_ms: 10_000,
        }
    }
}

impl SystemConfig {
    /// Reject combinations the hardware cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if usize::from(self.channel_count) > MUX_CHANNELS {
            return Err(ConfigError::ValidationFailed(
                "channel_count exceeds multiplexer width",
            ));
        }
        if self.alert_active_count > self.channel_count {
            return Err(ConfigError::ValidationFailed(
                "alert_active_count exceeds channel_count",
            ));
        }
        if self.pressure_threshold > ADC_MAX {
            return Err(ConfigError::ValidationFailed(
                "pressure_threshold above ADC full scale",
            ));
        }
        if self.cycle_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("cycle_interval_ms is zero"));
        }
        Ok(())
    }
}

/// Full-scale reading of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

// ---------------------------------------------------------------------------
// Network configuration
// ---------------------------------------------------------------------------

/// WiFi credentials and collector endpoint, taken from the build
/// environment (`CHAIR_WIFI_SSID`, `CHAIR_WIFI_PASS`, `CHAIR_COLLECTOR_URL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub wifi_ssid: heapless::String<32>,
    /// Never serialised; keeps the password out of the boot log.
    #[serde(skip)]
    pub wifi_password: heapless::String<64>,
    pub collector_url: heapless::String<192>,
}

const DEFAULT_COLLECTOR_URL: &str = "http://collector.local/exec";

impl NetworkConfig {
    /// Build from `option_env!` values baked in at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::new(
            option_env!("CHAIR_WIFI_SSID").unwrap_or("smartchair"),
            option_env!("CHAIR_WIFI_PASS").unwrap_or(""),
            option_env!("CHAIR_COLLECTOR_URL").unwrap_or(DEFAULT_COLLECTOR_URL),
        )
    }

    pub fn new(ssid: &str, password: &str, collector_url: &str) -> Result<Self, ConfigError> {
        if !(collector_url.starts_with("http://") || collector_url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed("collector_url must be http(s)"));
        }
        if collector_url.contains('?') {
            return Err(ConfigError::ValidationFailed(
                "collector_url must not carry a query string",
            ));
        }
        Ok(Self {
            wifi_ssid: heapless::String::try_from(ssid)
                .map_err(|_| ConfigError::ValidationFailed("wifi_ssid too long"))?,
            wifi_password: heapless::String::try_from(password)
                .map_err(|_| ConfigError::ValidationFailed("wifi_password too long"))?,
            collector_url: heapless::String::try_from(collector_url)
                .map_err(|_| ConfigError::ValidationFailed("collector_url too long"))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation; the message names which one.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
