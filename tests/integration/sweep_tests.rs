//! Pressure sweep against a recording board: ordering, routing and
//! counting through the real selector and `PressureArray`.

use proptest::prelude::*;

use crate::mock_hw::{pressure_array, Board, HwCall};

const SETTLE_US: u32 = 1_000;

fn ramp() -> [u16; 16] {
    core::array::from_fn(|i| (i as u16) * 100)
}

#[test]
fn sweep_samples_each_channel_in_order() {
    let board = Board::shared(ramp());
    let mut array = pressure_array(&board, SETTLE_US);

    let result = array.sweep(12, 500);

    assert_eq!(result.len(), 12);
    assert_eq!(result.samples(), &ramp()[..12]);
    let routed: Vec<u8> = board.borrow().samples().iter().map(|&(ch, _)| ch).collect();
    assert_eq!(routed, (0..12).collect::<Vec<u8>>());
}

#[test]
fn every_sample_follows_its_own_select_and_settle() {
    let board = Board::shared(ramp());
    let mut array = pressure_array(&board, SETTLE_US);

    array.sweep(12, 500);

    let calls = board.borrow().calls.clone();
    // Per channel: four line writes, one settle, one sample.
    assert_eq!(calls.len(), 12 * 6);
    for (ch, chunk) in calls.chunks(6).enumerate() {
        for (line, call) in chunk[..4].iter().enumerate() {
            assert_eq!(
                *call,
                HwCall::Line {
                    line,
                    high: (ch >> line) & 1 == 1
                }
            );
        }
        assert_eq!(chunk[4], HwCall::Delay { us: SETTLE_US });
        assert!(matches!(chunk[5], HwCall::Sample { channel, .. } if usize::from(channel) == ch));
    }
}

#[test]
fn active_count_uses_strict_threshold() {
    // Channels 0..12 read 0, 100, .., 1100; strictly above 500 are 6..=11.
    let board = Board::shared(ramp());
    let mut array = pressure_array(&board, SETTLE_US);

    assert_eq!(array.sweep(12, 500).active_count(), 6);
    assert_eq!(array.sweep(12, 1_100).active_count(), 0);
}

#[test]
fn consecutive_sweeps_are_independent() {
    let board = Board::shared([700; 16]);
    let mut array = pressure_array(&board, SETTLE_US);

    let first = array.sweep(12, 500);
    board.borrow_mut().values = [0; 16];
    let second = array.sweep(12, 500);

    assert_eq!(first.active_count(), 12);
    assert_eq!(second.active_count(), 0);
    assert_eq!(second.len(), 12);
}

#[test]
fn oversized_channel_count_is_clamped() {
    let board = Board::shared(ramp());
    let mut array = pressure_array(&board, SETTLE_US);

    let result = array.sweep(40, 0);

    assert_eq!(result.len(), 16);
    assert_eq!(board.borrow().samples().last(), Some(&(15, 1_500)));
}

#[test]
fn zero_channels_touches_nothing() {
    let board = Board::shared(ramp());
    let mut array = pressure_array(&board, SETTLE_US);

    let result = array.sweep(0, 500);

    assert!(result.is_empty());
    assert!(board.borrow().calls.is_empty());
}

proptest! {
    /// Any channel count up to the mux width yields exactly that many
    /// samples, each taken from its own channel, with the active count
    /// matching a strict filter.
    #[test]
    fn sweep_length_and_order_hold_for_any_count(
        values in proptest::array::uniform16(0u16..=4095),
        count in 0u8..=16,
        threshold in 0u16..=4095,
    ) {
        let board = Board::shared(values);
        let mut array = pressure_array(&board, SETTLE_US);

        let result = array.sweep(count, threshold);

        let n = usize::from(count);
        prop_assert_eq!(result.len(), n);
        for (i, &sample) in result.samples().iter().enumerate() {
            prop_assert_eq!(sample, values[i]);
        }
        let routed: Vec<u8> = board.borrow().samples().iter().map(|&(ch, _)| ch).collect();
        prop_assert_eq!(routed, (0..count).collect::<Vec<u8>>());
        let expected = values[..n].iter().filter(|&&v| v > threshold).count();
        prop_assert_eq!(usize::from(result.active_count()), expected);
    }
}
