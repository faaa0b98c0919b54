//! Posture status decision.
//!
//! Stateless: every cycle re-evaluates from that cycle's active count
//! alone.  No hysteresis, no transition rules.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Normal,
    Alert,
}

/// `Alert` iff more than `alert_threshold` sensors are active.
pub const fn decide(active_count: u8, alert_threshold: u8) -> StatusState {
    if active_count > alert_threshold {
        StatusState::Alert
    } else {
        StatusState::Normal
    }
}

impl StatusState {
    pub const fn is_alert(self) -> bool {
        matches!(self, Self::Alert)
    }
}
