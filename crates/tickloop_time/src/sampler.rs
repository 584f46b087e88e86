//! Frame time sampling

use std::time::Duration;

use crate::TimeSource;

/// Upper bound on the frame time fed into the accumulator
///
/// A stall longer than this (debugger break, window drag, slow fixed steps)
/// is treated as exactly this long, which caps the number of fixed-step
/// passes a single frame can demand.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

/// Measures elapsed time between consecutive frames
pub struct ClockSampler<C> {
    clock: C,
    last_sample: Duration,
}

impl<C: TimeSource> ClockSampler<C> {
    /// Create a sampler; the first frame is measured from this moment
    pub fn new(clock: C) -> Self {
        let last_sample = clock.now();
        Self { clock, last_sample }
    }

    /// Elapsed time since the previous sample, clamped to [`MAX_FRAME_TIME`]
    pub fn sample(&mut self) -> Duration {
        let now = self.clock.now();
        // A source that steps backwards reads as no time passing
        let raw = now.saturating_sub(self.last_sample);
        self.last_sample = now;

        if raw > MAX_FRAME_TIME {
            log::trace!(
                "Frame time {:?} clamped to {:?}",
                raw,
                MAX_FRAME_TIME
            );
            MAX_FRAME_TIME
        } else {
            raw
        }
    }

    /// Take a fresh baseline without producing a frame time
    pub fn restart(&mut self) {
        self.last_sample = self.clock.now();
    }

    /// The underlying time source
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
