//! CD74HC4067 channel selector.
//!
//! Four select lines carry the binary channel number (S0 = bit 0 …
//! S3 = bit 3) and route one of sixteen analog inputs to the shared SIG
//! line.  The selector only drives the lines; waiting for the multiplexer
//! to settle is the caller's job (see [`PressureArray`](super::pressure::PressureArray)).

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

/// Number of inputs on the multiplexer.
pub const MUX_CHANNELS: usize = 16;

/// Number of select lines.
pub const SELECT_LINES: usize = 4;

/// A multiplexer input, guaranteed to be in `0..16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChannelIndex(u8);

impl ChannelIndex {
    pub const fn new(channel: u8) -> Option<Self> {
        if (channel as usize) < MUX_CHANNELS {
            Some(Self(channel))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Level of each select line for this channel, line 0 first.
    pub const fn line_levels(self) -> [bool; SELECT_LINES] {
        [
            self.0 & 0b0001 != 0,
            self.0 & 0b0010 != 0,
            self.0 & 0b0100 != 0,
            self.0 & 0b1000 != 0,
        ]
    }

    /// Every channel in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..MUX_CHANNELS as u8).map(Self)
    }
}

/// Drives the four select lines of the multiplexer.
pub struct ChannelSelector<P> {
    lines: [P; SELECT_LINES],
}

impl<P: OutputPin> ChannelSelector<P> {
    /// `lines[0]` must be wired to S0, `lines[3]` to S3.
    pub fn new(lines: [P; SELECT_LINES]) -> Self {
        Self { lines }
    }

    /// Route `channel` to the SIG line.
    ///
    /// Every line is written on every call, so repeating a selection
    /// reproduces the same pattern.  A failed pin write is logged and the
    /// remaining lines are still driven.
    pub fn select(&mut self, channel: ChannelIndex) {
        for (line, (pin, high)) in self
            .lines
            .iter_mut()
            .zip(channel.line_levels())
            .enumerate()
        {
            if let Err(e) = pin.set_state(PinState::from(high)) {
                warn!("mux: S{} write failed for ch{}: {:?}", line, channel.get(), e);
            }
        }
    }
}
