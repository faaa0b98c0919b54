//! Structured per-cycle readings.
//!
//! The acquisition core fills a [`ChairReading`]; rendering it for the
//! collector is `uplink::query`'s job.

use crate::app::status::StatusState;
use crate::sensors::pressure::SweepResult;

/// Value substituted for a reading the sensor could not deliver.  The
/// dashboard treats `-1` as missing.
pub const SENTINEL: f32 = -1.0;

/// DHT22 temperature and relative humidity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentSample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl EnvironmentSample {
    pub const UNAVAILABLE: Self = Self {
        temperature_c: SENTINEL,
        humidity_pct: SENTINEL,
    };
}

/// MPU-6050 motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialSample {
    /// m/s², x / y / z
    pub accel: [f32; 3],
    /// rad/s, x / y / z
    pub gyro: [f32; 3],
    /// Die temperature, °C
    pub temperature_c: f32,
}

impl InertialSample {
    pub const UNAVAILABLE: Self = Self {
        accel: [0.0; 3],
        gyro: [0.0; 3],
        temperature_c: SENTINEL,
    };
}

/// Everything gathered in one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ChairReading {
    pub cycle: u32,
    pub pressure: SweepResult,
    pub status: StatusState,
    pub environment: EnvironmentSample,
    pub inertial: InertialSample,
}
