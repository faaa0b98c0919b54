//! Fuzz target: `uplink::query::render`
//!
//! Builds a reading from arbitrary bytes (samples plus raw float bit
//! patterns, NaN and infinities included) and checks that the rendered
//! query always fits and stays well-formed.
//!
//! cargo fuzz run fuzz_query_render

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartchair::app::reading::{ChairReading, EnvironmentSample, InertialSample};
use smartchair::app::status::decide;
use smartchair::sensors::pressure::SweepResult;
use smartchair::uplink::query;

fuzz_target!(|data: &[u8]| {
    let (head, tail) = data.split_at(data.len().min(32));
    let samples: Vec<u16> = head
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]) & 0x0FFF)
        .collect();

    let mut floats = tail
        .chunks_exact(4)
        .map(|c| f32::from_bits(u32::from_le_bytes([c[0], c[1], c[2], c[3]])));
    let mut next = || floats.next().unwrap_or(0.0);

    let pressure = SweepResult::from_samples(&samples, 500);
    let reading = ChairReading {
        cycle: 0,
        status: decide(pressure.active_count(), 4),
        pressure,
        environment: EnvironmentSample {
            temperature_c: next(),
            humidity_pct: next(),
        },
        inertial: InertialSample {
            accel: [next(), next(), next()],
            gyro: [next(), next(), next()],
            temperature_c: next(),
        },
    };

    let q = query::render(&reading).expect("any reading fits the query buffer");
    assert_eq!(q.split('&').count(), samples.len() + 9);
    assert!(!q.contains("NaN"));
});
