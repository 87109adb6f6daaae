use crate::RaffleConfig;
use std::time::Duration;

/// Cubic ease-out deceleration: ticks start at `min_interval` and stretch
/// towards `max_interval` as the draw runs out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinCurve {
    pub min_interval: Duration,
    pub max_interval: Duration,
    pub duration: Duration,
}

impl SpinCurve {
    pub fn new(min_interval: Duration, max_interval: Duration, duration: Duration) -> Self {
        Self {
            min_interval,
            max_interval,
            duration,
        }
    }

    pub fn from_config(config: &RaffleConfig) -> Self {
        Self::new(config.min_tick(), config.max_tick(), config.draw_duration())
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn easing(progress: f64) -> f64 {
        1.0 - (1.0 - progress.clamp(0.0, 1.0)).powi(3)
    }

    pub fn interval_at(&self, elapsed: Duration) -> Duration {
        let easing = Self::easing(self.progress(elapsed));
        let span = self.max_interval.saturating_sub(self.min_interval);
        self.min_interval + span.mul_f64(easing)
    }

    pub fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Whole seconds left on the countdown, rounded up.
    pub fn remaining_secs(&self, elapsed: Duration) -> u64 {
        self.duration.saturating_sub(elapsed).as_secs_f64().ceil() as u64
    }
}
