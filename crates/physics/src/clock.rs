//! Fixed-rate tick pacing for a real-time loop.

use crate::error::ConfigError;
use std::time::Duration;

/// Turns wall-clock time between frames into logic ticks. At most one tick
/// is released per call; time beyond that is dropped, so a slow frame
/// slows the game down instead of making it lurch forward.
#[derive(Clone, Debug)]
pub struct TickClock {
    interval: Duration,
    pending: Duration,
    ticks: u64,
    skipped: u64,
}

impl TickClock {
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `tick_rate` does not give a non-zero,
    /// representable tick interval.
    pub fn new(tick_rate: f32) -> Result<Self, ConfigError> {
        let interval = Duration::try_from_secs_f32(1.0 / tick_rate)
            .ok()
            .filter(|interval| !interval.is_zero())
            .ok_or_else(|| ConfigError::Invalid(format!("no usable tick interval at {tick_rate} ticks per second")))?;
        Ok(Self { interval, pending: Duration::ZERO, ticks: 0, skipped: 0 })
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Account for `elapsed` real time; returns whether a tick is due.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.pending += elapsed;
        if self.pending < self.interval {
            return false;
        }
        let surplus = self.pending - self.interval;
        let dropped = surplus.as_nanos() / self.interval.as_nanos().max(1);
        self.skipped += u64::try_from(dropped).unwrap_or(u64::MAX);
        self.pending = Duration::ZERO;
        self.ticks += 1;
        true
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.pending)
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whole ticks worth of time that were dropped instead of caught up.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
