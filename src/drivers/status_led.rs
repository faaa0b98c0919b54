//! Two-LED posture indicator.
//!
//! Discrete green (normal) and red (alert) LEDs on plain GPIO outputs.
//! Exactly one is lit at a time.  The LED being switched off is always
//! written first, so a transition passes through "both off", never
//! "both on".

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::IndicatorPort;
use crate::app::status::StatusState;

pub struct StatusIndicator<P> {
    normal: P,
    alert: P,
    current: StatusState,
}

impl<P: OutputPin> StatusIndicator<P> {
    /// Starts in [`StatusState::Normal`], so exactly one LED is lit from
    /// construction on, before the first cycle has run.
    pub fn new(normal: P, alert: P) -> Self {
        let mut indicator = Self {
            normal,
            alert,
            current: StatusState::Normal,
        };
        indicator.set(StatusState::Normal);
        indicator
    }

    pub fn set(&mut self, state: StatusState) {
        let (off, on) = match state {
            StatusState::Normal => (&mut self.alert, &mut self.normal),
            StatusState::Alert => (&mut self.normal, &mut self.alert),
        };
        if let Err(e) = off.set_low() {
            warn!("status LED: clear failed: {:?}", e);
        }
        if let Err(e) = on.set_high() {
            warn!("status LED: set failed: {:?}", e);
        }
        self.current = state;
    }

    /// Last state written.
    pub fn current(&self) -> StatusState {
        self.current
    }
}

impl<P: OutputPin> IndicatorPort for StatusIndicator<P> {
    fn show(&mut self, state: StatusState) {
        self.set(state);
    }
}
