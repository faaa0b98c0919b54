//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB serial in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { channel_count } => {
                info!("START | channels={}", channel_count);
            }
            AppEvent::Reading(r) => {
                info!(
                    "READ  | cycle={} | fsr={:?} active={} status={:?} | \
                     T={:.1}\u{00b0}C RH={:.1}% | \
                     acc=({:.2},{:.2},{:.2}) gyr=({:.2},{:.2},{:.2}) imuT={:.1}",
                    r.cycle,
                    r.pressure.samples(),
                    r.pressure.active_count(),
                    r.status,
                    r.environment.temperature_c,
                    r.environment.humidity_pct,
                    r.inertial.accel[0],
                    r.inertial.accel[1],
                    r.inertial.accel[2],
                    r.inertial.gyro[0],
                    r.inertial.gyro[1],
                    r.inertial.gyro[2],
                    r.inertial.temperature_c,
                );
            }
            AppEvent::UploadSucceeded { cycle, status } => {
                info!("UPLINK | cycle={} ok status={}", cycle, status);
            }
            AppEvent::UploadFailed { cycle, error } => {
                warn!("UPLINK | cycle={} failed: {}", cycle, error);
            }
        }
    }
}
