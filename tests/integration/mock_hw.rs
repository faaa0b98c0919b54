//! Mock hardware for integration tests.
//!
//! Two layers:
//!
//! - [`Board`]: select lines, settle delay and analog input sharing one
//!   recorded call history, so tests can check the exact select → settle →
//!   sample ordering of a real [`PressureArray`] sweep.
//! - [`MockChair`], [`MockUplink`], [`RecordingSink`]: port-level doubles
//!   for driving [`MonitorService`] through whole cycles.
//!
//! [`PressureArray`]: smartchair::sensors::pressure::PressureArray
//! [`MonitorService`]: smartchair::app::service::MonitorService

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use smartchair::app::events::AppEvent;
use smartchair::app::ports::{
    AnalogInput, EnvironmentPort, EventSink, IndicatorPort, InertialPort, PressurePort,
    UplinkError, UplinkPort, UplinkResponse,
};
use smartchair::app::reading::{EnvironmentSample, InertialSample};
use smartchair::app::status::StatusState;
use smartchair::sensors::mux::{ChannelSelector, MUX_CHANNELS};
use smartchair::sensors::pressure::{PressureArray, SweepResult};

// ── Board call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    Line { line: usize, high: bool },
    Delay { us: u32 },
    Sample { channel: u8, value: u16 },
}

// ── Board ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Board {
    levels: [bool; 4],
    pub values: [u16; MUX_CHANNELS],
    pub calls: Vec<HwCall>,
}

#[allow(dead_code)]
impl Board {
    pub fn shared(values: [u16; MUX_CHANNELS]) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            values,
            ..Self::default()
        }))
    }

    /// Channel currently routed to SIG, decoded from the select levels.
    pub fn routed(&self) -> u8 {
        self.levels
            .iter()
            .enumerate()
            .fold(0, |acc, (bit, &high)| acc | (u8::from(high) << bit))
    }

    pub fn samples(&self) -> Vec<(u8, u16)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                HwCall::Sample { channel, value } => Some((channel, value)),
                _ => None,
            })
            .collect()
    }
}

pub struct SelectLine {
    line: usize,
    board: Rc<RefCell<Board>>,
}

impl ErrorType for SelectLine {
    type Error = Infallible;
}

impl OutputPin for SelectLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut b = self.board.borrow_mut();
        b.levels[self.line] = false;
        b.calls.push(HwCall::Line { line: self.line, high: false });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut b = self.board.borrow_mut();
        b.levels[self.line] = true;
        b.calls.push(HwCall::Line { line: self.line, high: true });
        Ok(())
    }
}

pub struct BoardAdc(Rc<RefCell<Board>>);

impl AnalogInput for BoardAdc {
    fn read(&mut self) -> u16 {
        let mut b = self.0.borrow_mut();
        let channel = b.routed();
        let value = b.values[usize::from(channel)];
        b.calls.push(HwCall::Sample { channel, value });
        value
    }
}

pub struct BoardDelay(Rc<RefCell<Board>>);

impl DelayNs for BoardDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().calls.push(HwCall::Delay { us: ns / 1_000 });
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().calls.push(HwCall::Delay { us });
    }
}

pub type MockArray = PressureArray<SelectLine, BoardAdc, BoardDelay>;

/// A real [`PressureArray`] wired to `board`.
pub fn pressure_array(board: &Rc<RefCell<Board>>, settle_us: u32) -> MockArray {
    let lines = [0, 1, 2, 3].map(|line| SelectLine {
        line,
        board: Rc::clone(board),
    });
    PressureArray::new(
        ChannelSelector::new(lines),
        BoardAdc(Rc::clone(board)),
        BoardDelay(Rc::clone(board)),
        settle_us,
    )
}

// ── MockChair (port level) ────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortCall {
    Sweep { channel_count: u8, threshold: u16 },
    Environment,
    Inertial,
    Show(StatusState),
}

pub struct MockChair {
    pub samples: Vec<u16>,
    pub environment: EnvironmentSample,
    pub inertial: InertialSample,
    pub calls: Vec<PortCall>,
}

#[allow(dead_code)]
impl MockChair {
    pub fn with_samples(samples: &[u16]) -> Self {
        Self {
            samples: samples.to_vec(),
            environment: EnvironmentSample {
                temperature_c: 22.5,
                humidity_pct: 41.0,
            },
            inertial: InertialSample {
                accel: [0.1, -0.2, 9.81],
                gyro: [0.0, 0.01, -0.01],
                temperature_c: 30.25,
            },
            calls: Vec::new(),
        }
    }

    pub fn last_shown(&self) -> Option<StatusState> {
        self.calls.iter().rev().find_map(|c| match c {
            PortCall::Show(s) => Some(*s),
            _ => None,
        })
    }
}

impl PressurePort for MockChair {
    fn sweep(&mut self, channel_count: u8, threshold: u16) -> SweepResult {
        self.calls.push(PortCall::Sweep { channel_count, threshold });
        let n = usize::from(channel_count).min(self.samples.len());
        SweepResult::from_samples(&self.samples[..n], threshold)
    }
}

impl EnvironmentPort for MockChair {
    fn read_environment(&mut self) -> EnvironmentSample {
        self.calls.push(PortCall::Environment);
        self.environment
    }
}

impl InertialPort for MockChair {
    fn read_inertial(&mut self) -> InertialSample {
        self.calls.push(PortCall::Inertial);
        self.inertial
    }
}

impl IndicatorPort for MockChair {
    fn show(&mut self, state: StatusState) {
        self.calls.push(PortCall::Show(state));
    }
}

// ── MockUplink ────────────────────────────────────────────────

pub struct MockUplink {
    pub queries: Vec<String>,
    pub result: Result<u16, UplinkError>,
}

#[allow(dead_code)]
impl MockUplink {
    pub fn ok() -> Self {
        Self {
            queries: Vec::new(),
            result: Ok(200),
        }
    }

    pub fn failing(error: UplinkError) -> Self {
        Self {
            queries: Vec::new(),
            result: Err(error),
        }
    }
}

impl UplinkPort for MockUplink {
    fn send(&mut self, query: &str) -> Result<UplinkResponse, UplinkError> {
        self.queries.push(query.to_owned());
        self.result.map(|status| UplinkResponse {
            status,
            body: heapless::String::new(),
        })
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
