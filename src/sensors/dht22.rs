//! DHT22 (AM2302) temperature / humidity sensor on a single open-drain line.
//!
//! ```text
//! host:   ‾‾‾\_____ ≥1 ms _____/‾‾ release
//! sensor:                          \_80µs_/‾80µs‾\  then 40 bits:
//! bit:    \_50µs_/‾ 26µs = 0 | 70µs = 1 ‾\
//! ```
//!
//! A bit is decoded by sampling the line [`BIT_SAMPLE_US`] after its
//! rising edge.  The frame is humidity×10 (16 bits), temperature×10
//! (sign bit + 15 bits) and a checksum byte.
//!
//! The sensor must not be polled more often than every two seconds.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::EnvironmentPort;
use crate::app::reading::EnvironmentSample;
use crate::error::SensorError;

const START_LOW_US: u32 = 1_100;
/// Longest legal phase is the 80 µs response; anything past this is a dead line.
const EDGE_TIMEOUT_US: u32 = 100;
const BIT_SAMPLE_US: u32 = 35;

pub const FRAME_LEN: usize = 5;

/// Decode a raw 5-byte frame.
pub fn decode_frame(frame: &[u8; FRAME_LEN]) -> Result<EnvironmentSample, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity = u16::from_be_bytes([frame[0], frame[1]]);
    let magnitude = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);
    let temp = if frame[2] & 0x80 != 0 {
        -f32::from(magnitude)
    } else {
        f32::from(magnitude)
    };

    Ok(EnvironmentSample {
        temperature_c: temp / 10.0,
        humidity_pct: f32::from(humidity) / 10.0,
    })
}

pub struct Dht22<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// `pin` must be open-drain with a pull-up so that `set_high` releases
    /// the line.
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    pub fn read(&mut self) -> Result<EnvironmentSample, SensorError> {
        let frame = self.read_frame()?;
        decode_frame(&frame)
    }

    fn read_frame(&mut self) -> Result<[u8; FRAME_LEN], SensorError> {
        // Start signal
        self.pin.set_low().map_err(|_| SensorError::PinFailed)?;
        self.delay.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| SensorError::PinFailed)?;

        // Response: sensor pulls low, then high, then low for the first bit
        self.wait_for(false)?;
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; FRAME_LEN];
        for byte in &mut frame {
            for _ in 0..8 {
                self.wait_for(true)?;
                self.delay.delay_us(BIT_SAMPLE_US);
                let one = self.pin.is_high().map_err(|_| SensorError::PinFailed)?;
                *byte = (*byte << 1) | u8::from(one);
                if one {
                    self.wait_for(false)?;
                }
            }
        }
        Ok(frame)
    }

    fn wait_for(&mut self, high: bool) -> Result<(), SensorError> {
        for _ in 0..EDGE_TIMEOUT_US {
            if self.pin.is_high().map_err(|_| SensorError::PinFailed)? == high {
                return Ok(());
            }
            self.delay.delay_us(1);
        }
        Err(SensorError::Timeout)
    }
}

impl<P, D> EnvironmentPort for Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_environment(&mut self) -> EnvironmentSample {
        self.read().unwrap_or_else(|e| {
            warn!("DHT22 read failed: {}", e);
            EnvironmentSample::UNAVAILABLE
        })
    }
}
