//! Time primitives for the tickloop scheduler
//!
//! - [`TimeSource`] - Monotonic timestamp provider
//! - [`MonotonicClock`] - Wall clock backed by [`std::time::Instant`]
//! - [`ManualClock`] - Hand-advanced clock for tests and replays
//! - [`ClockSampler`] - Per-frame elapsed time, clamped to [`MAX_FRAME_TIME`]
//! - [`Accumulator`] - Unconsumed simulation time, paid off one tick at a time

mod accumulator;
mod clock;
mod sampler;

pub use accumulator::Accumulator;
pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use sampler::{ClockSampler, MAX_FRAME_TIME};
