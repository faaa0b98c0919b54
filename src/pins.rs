//! GPIO / peripheral pin assignments for the SmartChair sensor board.
//!
//! Single source of truth for the wiring.  Only `main` claims peripherals,
//! so it is the only consumer of these numbers; the drivers receive
//! already-configured pin objects.

// ---------------------------------------------------------------------------
// CD74HC4067 16-channel analog multiplexer
// ---------------------------------------------------------------------------

/// Select lines S0..S3, bit 0 first.
pub const MUX_SELECT_GPIOS: [i32; 4] = [14, 27, 26, 25];
/// Multiplexer SIG output on ADC1 channel 6 (GPIO 34 on ESP32).
pub const MUX_SIG_GPIO: i32 = 34;
/// ADC1 channel index for `MUX_SIG_GPIO`.
pub const MUX_SIG_ADC1_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// Posture indicator LEDs
// ---------------------------------------------------------------------------

/// Green LED: posture normal.
pub const LED_NORMAL_GPIO: i32 = 18;
/// Red LED: posture alert.
pub const LED_ALERT_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// DHT22 temperature / humidity (single-wire, open-drain)
// ---------------------------------------------------------------------------

pub const DHT22_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// I²C bus (MPU-6050)
// ---------------------------------------------------------------------------

// SDA = GPIO21, SCL = GPIO22.  Both are claimed as typed pins from
// `Peripherals` in `main`, so they have no raw numbers here.

/// Standard-mode bus clock.
pub const I2C_FREQ_HZ: u32 = 100_000;
