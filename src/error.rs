//! Unified error types for the SmartChair firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the boot
//! path in `main` can report any failure the same way.  All variants are
//! `Copy` so they pass through the port boundary without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned implausible data.
    Sensor(SensorError),
    /// A communication subsystem failed.
    Comms(CommsError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC unit or channel could not be configured.
    AdcInitFailed,
    /// I²C transaction failed (NACK, arbitration loss, bus error).
    I2cFailed,
    /// GPIO read or write returned an error.
    PinFailed,
    /// Device answered with an unexpected identity register.
    WrongDevice(u8),
    /// The single-wire line did not change level in time.
    Timeout,
    /// Frame checksum did not match.
    ChecksumMismatch,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcInitFailed => write!(f, "ADC init failed"),
            Self::I2cFailed => write!(f, "I2C transaction failed"),
            Self::PinFailed => write!(f, "GPIO access failed"),
            Self::WrongDevice(id) => write!(f, "unexpected device id 0x{id:02x}"),
            Self::Timeout => write!(f, "line level timeout"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    WifiConnectFailed,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiConnectFailed => write!(f, "WiFi connect failed"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_error_converts_and_displays() {
        let e: Error = SensorError::WrongDevice(0x72).into();
        assert_eq!(e, Error::Sensor(SensorError::WrongDevice(0x72)));
        assert_eq!(e.to_string(), "sensor: unexpected device id 0x72");
    }

    #[test]
    fn connect_failure_converts_to_comms() {
        use crate::adapters::wifi::ConnectivityError;

        let e = Error::from(ConnectivityError::ConnectionFailed);
        assert_eq!(e, Error::Comms(CommsError::WifiConnectFailed));
        assert_eq!(e.to_string(), "comms: WiFi connect failed");
        assert_eq!(
            Error::from(ConnectivityError::InvalidSsid),
            Error::Config("WiFi credentials")
        );
    }
}
