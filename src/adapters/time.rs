//! Monotonic clock for cycle pacing and reconnect backoff.
//!
//! - **`target_os = "espidf"`**: `esp_timer_get_time()` (µs since boot).
//! - **`not(target_os = "espidf")`**: `std::time::Instant`.

pub struct Clock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot.
    #[cfg(target_os = "espidf")]
    pub fn now_ms(&self) -> u64 {
        // SAFETY: reads the free-running RTC-backed timer; no preconditions.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since construction.
    #[cfg(not(target_os = "espidf"))]
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Time left in a cycle of `interval_ms` that began at `started_ms`.
    pub fn remaining_ms(&self, started_ms: u64, interval_ms: u32) -> u32 {
        let elapsed = self.now_ms().saturating_sub(started_ms);
        u64::from(interval_ms).saturating_sub(elapsed) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_never_underflows() {
        let clock = Clock::new();
        assert_eq!(clock.remaining_ms(0, 0), 0);
        assert!(clock.remaining_ms(clock.now_ms(), 5_000) <= 5_000);
    }
}
