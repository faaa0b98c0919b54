//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

use super::ports::UplinkError;
use super::reading::ChairReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has been constructed with a validated config.
    Started { channel_count: u8 },

    /// One acquisition cycle finished.
    Reading(ChairReading),

    /// The collector accepted a reading.
    UploadSucceeded { cycle: u32, status: u16 },

    /// A reading was not delivered.  It is not retried.
    UploadFailed { cycle: u32, error: UplinkError },
}
