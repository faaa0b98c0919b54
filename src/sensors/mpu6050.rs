//! MPU-6050 6-axis IMU over I²C.
//!
//! Accelerometer at ±2 g, gyroscope at ±250 °/s.  One read is a single
//! 14-byte burst starting at `ACCEL_XOUT_H`: accel x/y/z, die
//! temperature, gyro x/y/z, each a big-endian `i16`.

use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::InertialPort;
use crate::app::reading::InertialSample;
use crate::error::SensorError;

/// AD0 tied low.
pub const DEFAULT_ADDRESS: u8 = 0x68;

const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_WHO_AM_I: u8 = 0x75;

const WHO_AM_I_VALUE: u8 = 0x68;
/// PLL with X-gyro reference, sleep cleared.
const PWR_CLKSEL_PLL_X: u8 = 0x01;
const FS_SEL_250DPS: u8 = 0x00;
const AFS_SEL_2G: u8 = 0x00;

const ACCEL_LSB_PER_G: f32 = 16_384.0;
const GYRO_LSB_PER_DPS: f32 = 131.0;
const STANDARD_GRAVITY: f32 = 9.806_65;
const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Raw register counts from one burst read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMotion {
    pub accel: [i16; 3],
    pub temp: i16,
    pub gyro: [i16; 3],
}

impl RawMotion {
    pub fn from_burst(buf: &[u8; 14]) -> Self {
        let word = |i: usize| i16::from_be_bytes([buf[i], buf[i + 1]]);
        Self {
            accel: [word(0), word(2), word(4)],
            temp: word(6),
            gyro: [word(8), word(10), word(12)],
        }
    }

    /// Scale to m/s², rad/s and °C.
    pub fn to_sample(self) -> InertialSample {
        InertialSample {
            accel: self
                .accel
                .map(|a| f32::from(a) / ACCEL_LSB_PER_G * STANDARD_GRAVITY),
            gyro: self
                .gyro
                .map(|g| f32::from(g) / GYRO_LSB_PER_DPS * DEG_TO_RAD),
            temperature_c: f32::from(self.temp) / 340.0 + 36.53,
        }
    }
}

pub struct Mpu6050<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Mpu6050<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Wake the device, check its identity and set the full-scale ranges.
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.write_reg(REG_PWR_MGMT_1, PWR_CLKSEL_PLL_X)?;

        let id = self.read_reg(REG_WHO_AM_I)?;
        if id != WHO_AM_I_VALUE {
            return Err(SensorError::WrongDevice(id));
        }

        self.write_reg(REG_ACCEL_CONFIG, AFS_SEL_2G)?;
        self.write_reg(REG_GYRO_CONFIG, FS_SEL_250DPS)?;
        info!("MPU-6050 at 0x{:02x}: ±2 g, ±250 °/s", self.address);
        Ok(())
    }

    pub fn read_raw(&mut self) -> Result<RawMotion, SensorError> {
        let mut buf = [0u8; 14];
        self.i2c
            .write_read(self.address, &[REG_ACCEL_XOUT_H], &mut buf)
            .map_err(|_| SensorError::I2cFailed)?;
        Ok(RawMotion::from_burst(&buf))
    }

    pub fn read(&mut self) -> Result<InertialSample, SensorError> {
        self.read_raw().map(RawMotion::to_sample)
    }

    pub fn release(self) -> I {
        self.i2c
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| SensorError::I2cFailed)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| SensorError::I2cFailed)?;
        Ok(buf[0])
    }
}

impl<I: I2c> InertialPort for Mpu6050<I> {
    fn read_inertial(&mut self) -> InertialSample {
        self.read().unwrap_or_else(|e| {
            warn!("MPU-6050 read failed: {}", e);
            InertialSample::UNAVAILABLE
        })
    }
}
