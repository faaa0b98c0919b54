//! Sensor subsystem.
//!
//! - [`mux`] / [`pressure`]: the FSR seat array behind the 16-channel
//!   multiplexer (the acquisition core).
//! - [`dht22`]: ambient temperature and humidity.
//! - [`mpu6050`]: seat tilt and movement.
//!
//! Every driver is generic over `embedded-hal` traits; the concrete ESP32
//! pins come from `drivers::hw_init` and `esp-idf-hal`.

pub mod dht22;
pub mod mpu6050;
pub mod mux;
pub mod pressure;
