//! Hardware adapter: bundles the board peripherals behind the domain ports.
//!
//! Owns the pressure array, the DHT22, the MPU-6050 and the status LEDs,
//! exposing them together so [`MonitorService::acquire`] can take a single
//! `&mut` to the whole board.  A single owner also rules out interleaving
//! a sweep with any other peripheral access.
//!
//! [`MonitorService::acquire`]: crate::app::service::MonitorService::acquire

use crate::app::ports::{EnvironmentPort, IndicatorPort, InertialPort, PressurePort};
use crate::app::reading::{EnvironmentSample, InertialSample};
use crate::app::status::StatusState;
use crate::sensors::pressure::SweepResult;

/// Concrete adapter that combines all board hardware behind port traits.
pub struct HardwareAdapter<S, E, M, L> {
    pressure: S,
    environment: E,
    inertial: M,
    indicator: L,
}

impl<S, E, M, L> HardwareAdapter<S, E, M, L> {
    pub fn new(pressure: S, environment: E, inertial: M, indicator: L) -> Self {
        Self {
            pressure,
            environment,
            inertial,
            indicator,
        }
    }
}

// ── Sensor ports ──────────────────────────────────────────────

impl<S: PressurePort, E, M, L> PressurePort for HardwareAdapter<S, E, M, L> {
    fn sweep(&mut self, channel_count: u8, threshold: u16) -> SweepResult {
        self.pressure.sweep(channel_count, threshold)
    }
}

impl<S, E: EnvironmentPort, M, L> EnvironmentPort for HardwareAdapter<S, E, M, L> {
    fn read_environment(&mut self) -> EnvironmentSample {
        self.environment.read_environment()
    }
}

impl<S, E, M: InertialPort, L> InertialPort for HardwareAdapter<S, E, M, L> {
    fn read_inertial(&mut self) -> InertialSample {
        self.inertial.read_inertial()
    }
}

// ── Indicator port ────────────────────────────────────────────

impl<S, E, M, L: IndicatorPort> IndicatorPort for HardwareAdapter<S, E, M, L> {
    fn show(&mut self, state: StatusState) {
        self.indicator.show(state);
    }
}
