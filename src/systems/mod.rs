//! Demo systems
//!
//! Fixed-step simulation systems plus a variable-step reporter.

mod report;
mod simulation;

pub use report::FrameReporter;
pub use simulation::{Integrator, Reaper, Spawner};
