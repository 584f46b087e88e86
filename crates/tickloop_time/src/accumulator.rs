//! Fixed-step time accumulator

use std::time::Duration;

/// Unconsumed simulation time ("time debt")
///
/// Frame time is added once per frame; each fixed-step pass pays off exactly
/// one tick. Once the caller has drained every whole tick, the remaining
/// debt is strictly less than one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accumulator {
    tick: Duration,
    debt: Duration,
}

impl Accumulator {
    /// Create an empty accumulator for the given tick duration
    ///
    /// `tick` must be non-zero; validation is the caller's job.
    pub fn new(tick: Duration) -> Self {
        debug_assert!(!tick.is_zero(), "tick duration must be non-zero");
        Self {
            tick,
            debt: Duration::ZERO,
        }
    }

    /// The fixed tick duration
    #[inline]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Current unconsumed time
    #[inline]
    pub fn debt(&self) -> Duration {
        self.debt
    }

    /// Add a frame's elapsed time
    pub fn add(&mut self, frame_time: Duration) {
        self.debt += frame_time;
    }

    /// Whether at least one whole tick is owed
    #[inline]
    pub fn has_tick(&self) -> bool {
        self.debt >= self.tick
    }

    /// Pay off one tick
    ///
    /// Returns `false` (and leaves the debt alone) when less than a tick is
    /// owed.
    pub fn consume_tick(&mut self) -> bool {
        match self.debt.checked_sub(self.tick) {
            Some(rest) => {
                self.debt = rest;
                true
            }
            None => false,
        }
    }

    /// Interpolation factor `debt / tick`
    ///
    /// In `[0, 1)` once all whole ticks have been consumed.
    pub fn alpha(&self) -> f64 {
        self.debt.as_secs_f64() / self.tick.as_secs_f64()
    }

    /// Drop all unconsumed time
    pub fn clear(&mut self) {
        self.debt = Duration::ZERO;
    }
}
