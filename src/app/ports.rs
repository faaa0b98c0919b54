//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (pressure array, DHT22, MPU-6050, LEDs, HTTP uplink,
//! event sinks) implement these traits.  The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Digital select lines and timing use the `embedded-hal` traits
//! (`OutputPin`, `DelayNs`) directly; only the analog read has no
//! `embedded-hal` 1.0 equivalent and gets its own capability here.

use core::fmt;

use super::reading::{EnvironmentSample, InertialSample};
use super::status::StatusState;
use crate::sensors::pressure::SweepResult;

// ───────────────────────────────────────────────────────────────
// Analog capability (hardware → pressure array)
// ───────────────────────────────────────────────────────────────

/// Shared analog input behind the multiplexer.
pub trait AnalogInput {
    /// Blocking one-shot conversion of the line as currently routed.
    /// No error signalling: a failed conversion reads as 0.
    fn read(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Seat pressure array.
pub trait PressurePort {
    /// Sample channels `0..channel_count`, counting samples above `threshold`.
    fn sweep(&mut self, channel_count: u8, threshold: u16) -> SweepResult;
}

/// Temperature / humidity source.  Implementations substitute
/// [`EnvironmentSample::UNAVAILABLE`] on a failed read.
pub trait EnvironmentPort {
    fn read_environment(&mut self) -> EnvironmentSample;
}

/// Acceleration / angular-rate source.  Implementations substitute
/// [`InertialSample::UNAVAILABLE`] on a failed read.
pub trait InertialPort {
    fn read_inertial(&mut self) -> InertialSample;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    /// Light exactly the LED for `state`.
    fn show(&mut self, state: StatusState);
}

// ───────────────────────────────────────────────────────────────
// Uplink port (driven adapter: domain → collector)
// ───────────────────────────────────────────────────────────────

/// Outcome of a delivered request.  Status and body are for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UplinkResponse {
    pub status: u16,
    /// Leading bytes of the body, lossily decoded.
    pub body: heapless::String<128>,
}

pub trait UplinkPort {
    /// Send one rendered query string to the collector.
    fn send(&mut self, query: &str) -> Result<UplinkResponse, UplinkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UplinkError {
    /// The wireless link is down; nothing was sent.
    LinkDown,
    /// The reading did not fit the request buffer.
    RequestTooLarge,
    /// Connection, TLS or I/O failure before a status line arrived.
    Transport,
    /// The collector answered with a non-success status.
    Status(u16),
}

impl fmt::Display for UplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkDown => write!(f, "link down"),
            Self::RequestTooLarge => write!(f, "request too large"),
            Self::Transport => write!(f, "transport error"),
            Self::Status(code) => write!(f, "collector returned {}", code),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
