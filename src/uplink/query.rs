//! Query-string rendering of a [`ChairReading`].
//!
//! Flat `key=value` pairs joined by `&`, keys in the order the collector
//! sheet columns expect them:
//!
//! ```text
//! FSR0..FSR11 · AccelX/Y/Z · GyroX/Y/Z · MPUTemp · DHTTemp · DHTHumidity
//! ```
//!
//! All keys and numeric values are URL-safe, so no percent-encoding is
//! needed.

use core::fmt::Write;

use crate::app::reading::{ChairReading, SENTINEL};

/// Rendered query buffer size.  A realistic 16-channel reading needs ~330
/// bytes; the worst case (every float at `f32::MAX`) stays under 700.
pub const QUERY_CAPACITY: usize = 768;

pub type Query = heapless::String<QUERY_CAPACITY>;

const AXES: [&str; 3] = ["X", "Y", "Z"];

/// Render `reading` into a fresh query buffer.
pub fn render(reading: &ChairReading) -> Result<Query, core::fmt::Error> {
    let mut q = Query::new();
    write_query(&mut q, reading)?;
    Ok(q)
}

/// Append the query for `reading` to any `fmt::Write` sink.
pub fn write_query<W: Write>(out: &mut W, reading: &ChairReading) -> core::fmt::Result {
    let mut sep = Separator::default();

    for (ch, raw) in reading.pressure.samples().iter().enumerate() {
        sep.write(out)?;
        write!(out, "FSR{}={}", ch, raw)?;
    }

    let imu = &reading.inertial;
    for (axis, v) in AXES.iter().zip(imu.accel) {
        sep.write(out)?;
        write!(out, "Accel{}=", axis)?;
        write_fixed(out, v)?;
    }
    for (axis, v) in AXES.iter().zip(imu.gyro) {
        sep.write(out)?;
        write!(out, "Gyro{}=", axis)?;
        write_fixed(out, v)?;
    }

    let env = &reading.environment;
    for (key, v) in [
        ("MPUTemp", imu.temperature_c),
        ("DHTTemp", env.temperature_c),
        ("DHTHumidity", env.humidity_pct),
    ] {
        sep.write(out)?;
        write!(out, "{}=", key)?;
        write_fixed(out, v)?;
    }
    Ok(())
}

/// Two decimals; NaN and infinities become the sentinel.
fn write_fixed<W: Write>(out: &mut W, v: f32) -> core::fmt::Result {
    let v = if v.is_finite() { v } else { SENTINEL };
    write!(out, "{:.2}", v)
}

#[derive(Default)]
struct Separator {
    started: bool,
}

impl Separator {
    fn write<W: Write>(&mut self, out: &mut W) -> core::fmt::Result {
        if self.started {
            out.write_char('&')
        } else {
            self.started = true;
            Ok(())
        }
    }
}
