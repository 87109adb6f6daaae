use super::SpinCurve;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced { index: usize },
    Expired,
}

/// Per-draw animation state: how long the draw has run, how long until the
/// next tick, and which slot is on display.
#[derive(Debug, Clone)]
pub struct SpinTimingState {
    elapsed: Duration,
    interval: Duration,
    index: usize,
    len: usize,
}

impl SpinTimingState {
    pub fn new(curve: &SpinCurve, len: usize) -> Self {
        Self {
            elapsed: Duration::ZERO,
            interval: curve.interval_at(Duration::ZERO),
            index: 0,
            len,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// One tick: record elapsed time, re-derive the interval, then either stop
    /// or move the display one slot forward.
    pub fn step(&mut self, elapsed: Duration, curve: &SpinCurve) -> TickOutcome {
        self.elapsed = elapsed;
        self.interval = curve.interval_at(elapsed);

        if curve.is_expired(elapsed) || self.len == 0 {
            return TickOutcome::Expired;
        }

        self.index = (self.index + 1) % self.len;
        TickOutcome::Advanced { index: self.index }
    }
}
