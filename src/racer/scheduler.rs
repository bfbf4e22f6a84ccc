//! Fixed-cadence tick scheduling driven by elapsed wall time.

use std::time::{Duration, Instant};

/// Cancellable periodic tick source.
///
/// The driver feeds elapsed milliseconds through [`TickScheduler::advance`],
/// which reports at most one due tick per call. Time owed beyond one period
/// is dropped, so a slow frame delays the next tick instead of replaying a
/// burst of them.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period_ms: u64,
    accumulated_ms: u64,
    active: bool,
}

impl TickScheduler {
    /// An inactive scheduler with the given period (clamped to at least 1ms).
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            accumulated_ms: 0,
            active: false,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
        self.accumulated_ms = 0;
    }

    /// Cancel pending ticks. Idempotent.
    pub fn stop(&mut self) {
        self.active = false;
        self.accumulated_ms = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// Add `dt_ms` of elapsed time. Returns true if a tick is due now.
    pub fn advance(&mut self, dt_ms: u64) -> bool {
        if !self.active {
            return false;
        }

        self.accumulated_ms = self.accumulated_ms.saturating_add(dt_ms);
        if self.accumulated_ms < self.period_ms {
            return false;
        }

        self.accumulated_ms = (self.accumulated_ms - self.period_ms) % self.period_ms;
        true
    }

    /// How long the driver can wait before the next tick is due. `None` when
    /// inactive.
    pub fn until_next(&self) -> Option<Duration> {
        if !self.active {
            return None;
        }
        Some(Duration::from_millis(
            self.period_ms.saturating_sub(self.accumulated_ms),
        ))
    }
}

/// Converts wall-clock instants into whole elapsed milliseconds without
/// losing the sub-millisecond remainder between frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new(start: Instant) -> Self {
        Self { last: start }
    }

    /// Whole milliseconds since the previous call. The fractional part stays
    /// on the clock and is counted next time.
    pub fn elapsed_ms(&mut self, now: Instant) -> u64 {
        let dt_ms = now.saturating_duration_since(self.last).as_millis() as u64;
        self.last += Duration::from_millis(dt_ms);
        dt_ms
    }
}
