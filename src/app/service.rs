//! Application service: the acquisition cycle.
//!
//! [`MonitorService`] holds the immutable configuration and a cycle
//! counter.  All I/O flows through port traits passed in at call sites,
//! making the whole cycle testable with mock adapters.
//!
//! ```text
//!  PressurePort ──▶ ┌───────────────────────┐ ──▶ IndicatorPort
//!  EnvironmentPort ▶│    MonitorService     │ ──▶ EventSink
//!  InertialPort ──▶ │ sweep · decide · pack │ ──▶ UplinkPort
//!                   └───────────────────────┘
//! ```
//!
//! Ordering within a cycle is fixed: the sweep runs to completion before
//! the environmental and inertial reads, and the uplink only ever sees a
//! finished [`ChairReading`].

use log::{info, warn};

use crate::config::{ConfigError, SystemConfig};
use crate::uplink::query;

use super::events::AppEvent;
use super::ports::{
    EnvironmentPort, EventSink, IndicatorPort, InertialPort, PressurePort, UplinkError,
    UplinkPort,
};
use super::reading::ChairReading;
use super::status::decide;

pub struct MonitorService {
    config: SystemConfig,
    cycle: u32,
}

impl MonitorService {
    /// Validates `config`; an invalid config never reaches the hardware.
    pub fn new(config: SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, cycle: 0 })
    }

    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            channel_count: self.config.channel_count,
        });
        info!(
            "MonitorService started: {} channels, threshold {}, alert above {}",
            self.config.channel_count, self.config.pressure_threshold, self.config.alert_active_count
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Sweep → environment → inertial → decide → indicator.
    ///
    /// `hw` satisfies every sensor port plus the indicator, mirroring how
    /// the board adapter owns all the peripherals at once.
    pub fn acquire(
        &mut self,
        hw: &mut (impl PressurePort + EnvironmentPort + InertialPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) -> ChairReading {
        self.cycle = self.cycle.wrapping_add(1);

        // 1. Pressure sweep (exclusive use of the multiplexer)
        let pressure = hw.sweep(self.config.channel_count, self.config.pressure_threshold);

        // 2. External collaborators, strictly after the sweep
        let environment = hw.read_environment();
        let inertial = hw.read_inertial();

        // 3. Status for this cycle only
        let status = decide(pressure.active_count(), self.config.alert_active_count);
        hw.show(status);

        let reading = ChairReading {
            cycle: self.cycle,
            pressure,
            status,
            environment,
            inertial,
        };
        sink.emit(&AppEvent::Reading(reading.clone()));
        reading
    }

    /// Render and send one reading.  Failures are reported, never retried.
    pub fn upload(
        &self,
        reading: &ChairReading,
        uplink: &mut impl UplinkPort,
        sink: &mut impl EventSink,
    ) -> Result<u16, UplinkError> {
        let result = query::render(reading)
            .map_err(|_| UplinkError::RequestTooLarge)
            .and_then(|q| uplink.send(&q));

        match result {
            Ok(resp) => {
                sink.emit(&AppEvent::UploadSucceeded {
                    cycle: reading.cycle,
                    status: resp.status,
                });
                Ok(resp.status)
            }
            Err(error) => {
                warn!("cycle {}: upload failed: {}", reading.cycle, error);
                sink.emit(&AppEvent::UploadFailed {
                    cycle: reading.cycle,
                    error,
                });
                Err(error)
            }
        }
    }

    /// Report a reading that was skipped because the link is down.
    pub fn skip_upload(&self, reading: &ChairReading, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::UploadFailed {
            cycle: reading.cycle,
            error: UplinkError::LinkDown,
        });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Cycles completed since boot.
    pub fn cycle_count(&self) -> u32 {
        self.cycle
    }
}
