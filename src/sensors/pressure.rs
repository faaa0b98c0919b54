//! FSR seat-pressure array behind the multiplexer.
//!
//! One sweep walks the channels in ascending order.  For each channel:
//! select, wait the settle delay, take exactly one sample.  Owning the
//! selector, the analog input and the delay in one value means `&mut self`
//! serialises the whole select → settle → sample sequence; nothing else can
//! switch the multiplexer mid-sweep.
//!
//! There is no failure detection here: a stuck or saturated input reads
//! like any other value.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use super::mux::{ChannelIndex, ChannelSelector, MUX_CHANNELS};
use crate::app::ports::{AnalogInput, PressurePort};

/// Samples of one sweep plus the derived active count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepResult {
    samples: heapless::Vec<u16, MUX_CHANNELS>,
    active_count: u8,
}

impl SweepResult {
    /// Build a result from raw samples, counting those strictly above
    /// `threshold`.  Samples past the multiplexer width are dropped.
    pub fn from_samples(samples: &[u16], threshold: u16) -> Self {
        let mut result = Self::default();
        for &raw in samples.iter().take(MUX_CHANNELS) {
            result.push(raw, threshold);
        }
        result
    }

    fn push(&mut self, raw: u16, threshold: u16) {
        // Capacity equals MUX_CHANNELS and callers never exceed it.
        if self.samples.push(raw).is_ok() && raw > threshold {
            self.active_count += 1;
        }
    }

    /// Samples indexed by channel.
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    pub fn active_count(&self) -> u8 {
        self.active_count
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The multiplexed pressure array: selector + shared analog input + delay.
pub struct PressureArray<P, A, D> {
    selector: ChannelSelector<P>,
    adc: A,
    delay: D,
    settle_us: u32,
}

impl<P, A, D> PressureArray<P, A, D>
where
    P: OutputPin,
    A: AnalogInput,
    D: DelayNs,
{
    pub fn new(selector: ChannelSelector<P>, adc: A, delay: D, settle_us: u32) -> Self {
        Self {
            selector,
            adc,
            delay,
            settle_us,
        }
    }

    /// Sample channels `0..channel_count` once each.
    ///
    /// `channel_count` above the multiplexer width is clamped.
    pub fn sweep(&mut self, channel_count: u8, threshold: u16) -> SweepResult {
        let count = usize::from(channel_count);
        if count > MUX_CHANNELS {
            warn!(
                "sweep: channel_count {} clamped to {}",
                channel_count, MUX_CHANNELS
            );
        }

        let mut result = SweepResult::default();
        for channel in ChannelIndex::all().take(count) {
            self.selector.select(channel);
            self.delay.delay_us(self.settle_us);
            let raw = self.adc.read();
            result.push(raw, threshold);
        }

        debug!(
            "sweep: {} channels, {} active (> {})",
            result.len(),
            result.active_count(),
            threshold
        );
        result
    }
}

impl<P, A, D> PressurePort for PressureArray<P, A, D>
where
    P: OutputPin,
    A: AnalogInput,
    D: DelayNs,
{
    fn sweep(&mut self, channel_count: u8, threshold: u16) -> SweepResult {
        PressureArray::sweep(self, channel_count, threshold)
    }
}
