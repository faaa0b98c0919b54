//! Fuzz target: `dht22::decode_frame`
//!
//! Any 5-byte frame must either decode to in-range values or be rejected
//! on checksum; the decoder never panics.
//!
//! cargo fuzz run fuzz_dht_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartchair::sensors::dht22::{decode_frame, FRAME_LEN};

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = <[u8; FRAME_LEN]>::try_from(data) else {
        return;
    };
    if let Ok(sample) = decode_frame(&frame) {
        // 16-bit magnitudes scaled by 0.1.
        assert!((0.0..=6553.5).contains(&sample.humidity_pct));
        assert!(sample.temperature_c.abs() <= 3276.7);
    }
});
