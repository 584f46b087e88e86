//! Fixed-timestep scheduling for an ordered list of systems
//!
//! This crate drives the systems a host registers:
//!
//! - [`System`] - A unit of work, optionally tagged [`Step::Fixed`]
//! - [`SystemHost`] - The collaborator that owns the systems and flushes pending mutations
//! - [`Partitioning`] - One-time split into fixed-step and variable-step [`Group`]s
//! - [`SystemHandle`] - O(1) address of a classified system for enable/disable
//! - [`Scheduler`] - Accumulator loop running zero or more fixed passes, then one variable pass
//! - [`SchedulerConfig`] / [`TickRate`] - Construction options
//! - [`FrameStats`] - What a single frame call did
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use tickloop_core::{Scheduler, Step, System, SystemHost};
//!
//! struct Physics;
//! impl System for Physics {
//!     fn process(&mut self) {}
//!     fn step(&self) -> Step { Step::Fixed }
//! }
//!
//! struct Host { systems: Vec<Box<dyn System>> }
//! impl SystemHost for Host {
//!     fn systems(&self) -> &[Box<dyn System>] { &self.systems }
//!     fn systems_mut(&mut self) -> &mut [Box<dyn System>] { &mut self.systems }
//!     fn flush(&mut self) {}
//! }
//!
//! let mut host = Host { systems: vec![Box::new(Physics)] };
//! let mut scheduler = Scheduler::with_tick(Duration::from_millis(40)).unwrap();
//! scheduler.initialize(&host);
//! scheduler.set_enabled::<Physics>(false).unwrap();
//! scheduler.process(&mut host);
//! ```

mod config;
mod error;
mod partition;
mod scheduler;
mod system;

pub use config::{SchedulerConfig, TickRate};
pub use error::{Result, SchedulerError};
pub use partition::{Group, Partitioning, SystemHandle};
pub use scheduler::{FrameStats, Scheduler};
pub use system::{Step, System, SystemHost};

// Re-export the time primitives so hosts need a single dependency
pub use tickloop_time::{Accumulator, ClockSampler, ManualClock, MonotonicClock, TimeSource, MAX_FRAME_TIME};
