//! Fixed-timestep frame loop
//!
//! Each call to [`Scheduler::process`]:
//! 1. Classifies the host's systems (first call only)
//! 2. Samples the clamped frame time and adds it to the accumulator
//! 3. Runs the fixed-step group once per whole tick owed
//! 4. Runs the variable-step group once
//!
//! Every executed system is followed by [`SystemHost::flush`].

use std::any::TypeId;
use std::time::Duration;

use tickloop_time::{Accumulator, ClockSampler, MonotonicClock, TimeSource};

use crate::partition::Group;
use crate::{
    Partitioning, Result, SchedulerConfig, SchedulerError, System, SystemHandle, SystemHost,
};

/// What a single frame call did
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// Clamped elapsed time fed into the accumulator
    pub frame_time: Duration,
    /// Number of full fixed-step passes
    pub fixed_passes: u32,
    /// Number of system executions (fixed and variable, disabled excluded)
    pub systems_run: usize,
    /// Interpolation factor, present only when alpha exposure is enabled
    pub alpha: Option<f64>,
}

/// Drives a host's systems at a fixed simulation rate
///
/// The scheduler owns all of its state (groups, enabled masks, accumulator,
/// clock baseline) and is used from a single thread.
pub struct Scheduler<C: TimeSource = MonotonicClock> {
    config: SchedulerConfig,
    sampler: ClockSampler<C>,
    accumulator: Accumulator,
    /// `None` until the host's systems are classified
    partitions: Option<Partitioning>,
    /// Bumped by every reset; stamped on handles
    generation: u32,
}

impl Scheduler<MonotonicClock> {
    /// Create a scheduler timed by the wall clock
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock::new())
    }

    /// Create a scheduler with an explicit tick duration and default options
    pub fn with_tick(tick: Duration) -> Result<Self> {
        Self::from_parts(SchedulerConfig::default(), tick, MonotonicClock::new())
    }
}

impl<C: TimeSource> Scheduler<C> {
    /// Create a scheduler timed by `clock`
    ///
    /// Fails if the configured tick rate does not resolve to a positive
    /// duration.
    pub fn with_clock(config: SchedulerConfig, clock: C) -> Result<Self> {
        let tick = config.tick_rate.tick_duration()?;
        Self::from_parts(config, tick, clock)
    }

    /// Create a scheduler with an explicit tick duration timed by `clock`
    pub fn with_tick_and_clock(tick: Duration, clock: C) -> Result<Self> {
        Self::from_parts(SchedulerConfig::default(), tick, clock)
    }

    fn from_parts(config: SchedulerConfig, tick: Duration, clock: C) -> Result<Self> {
        if tick.is_zero() {
            return Err(SchedulerError::InvalidTickDuration(
                "tick duration must be non-zero".to_string(),
            ));
        }

        log::debug!(
            "Scheduler created: tick {:?}, report_delta={}, expose_alpha={}",
            tick,
            config.report_delta,
            config.expose_alpha
        );

        Ok(Self {
            config,
            sampler: ClockSampler::new(clock),
            accumulator: Accumulator::new(tick),
            partitions: None,
            generation: 0,
        })
    }

    // --- Lifecycle ---

    /// Classify the host's systems ahead of the first frame
    ///
    /// Lets enable/disable calls resolve before the first [`process`].
    /// Does nothing if classification already happened.
    ///
    /// [`process`]: Scheduler::process
    pub fn initialize<H: SystemHost + ?Sized>(&mut self, host: &H) {
        ensure_partitioned(&mut self.partitions, host.systems(), self.generation);
    }

    /// Whether the host's systems have been classified
    pub fn is_initialized(&self) -> bool {
        self.partitions.is_some()
    }

    /// Return to the freshly-constructed state
    ///
    /// Drops the classification and enabled masks, empties the accumulator
    /// and restarts the frame clock. The next [`initialize`] or [`process`]
    /// classifies the host's current system list. Handles issued before the
    /// reset are rejected with [`SchedulerError::StaleHandle`].
    ///
    /// [`initialize`]: Scheduler::initialize
    /// [`process`]: Scheduler::process
    pub fn reset(&mut self) {
        self.partitions = None;
        self.generation = self.generation.wrapping_add(1);
        self.accumulator.clear();
        self.sampler.restart();
        log::debug!("Scheduler reset");
    }

    // --- Frame loop ---

    /// Run one frame
    ///
    /// Call once per host frame.
    pub fn process<H: SystemHost + ?Sized>(&mut self, host: &mut H) -> FrameStats {
        // 1. Classify on first use
        let partitions = ensure_partitioned(&mut self.partitions, host.systems(), self.generation);

        // 2. Sample clamped frame time into the accumulator
        let frame_time = self.sampler.sample();
        self.accumulator.add(frame_time);

        // 3. Fixed-step passes until the debt is below one tick
        if self.config.report_delta {
            host.set_delta(self.accumulator.tick());
        }
        let mut fixed_passes = 0;
        let mut systems_run = 0;
        while self.accumulator.has_tick() {
            systems_run += run_group(partitions.fixed(), host);
            self.accumulator.consume_tick();
            fixed_passes += 1;
        }
        debug_assert!(self.accumulator.debt() < self.accumulator.tick());

        // 4. Single variable-step pass
        if self.config.report_delta {
            host.set_delta(frame_time);
        }
        systems_run += run_group(partitions.variable(), host);

        // 5. Interpolation factor for presentation
        let alpha = if self.config.expose_alpha {
            let alpha = self.accumulator.alpha();
            host.set_alpha(alpha);
            Some(alpha)
        } else {
            None
        };

        log::trace!(
            "Frame: {:?} elapsed, {} fixed passes, {} systems run",
            frame_time,
            fixed_passes,
            systems_run
        );

        FrameStats {
            frame_time,
            fixed_passes,
            systems_run,
            alpha,
        }
    }

    // --- Accessors ---

    /// Options the scheduler was built with
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Fixed simulation step
    pub fn tick_duration(&self) -> Duration {
        self.accumulator.tick()
    }

    /// Unconsumed simulation time carried into the next frame
    pub fn accumulated(&self) -> Duration {
        self.accumulator.debt()
    }

    /// Interpolation factor `accumulated / tick`, in `[0, 1)` between frames
    pub fn alpha(&self) -> f64 {
        self.accumulator.alpha()
    }

    /// The classification, once built
    pub fn partitions(&self) -> Option<&Partitioning> {
        self.partitions.as_ref()
    }

    /// The scheduler's time source
    pub fn clock(&self) -> &C {
        self.sampler.clock()
    }

    // --- Enable/disable control ---

    /// Handle of the first registered system of type `S`
    pub fn handle_of<S: System>(&self) -> Result<SystemHandle> {
        self.handle_by_type(TypeId::of::<S>(), || std::any::type_name::<S>().to_string())
    }

    /// Whether the first registered system of type `S` runs
    pub fn is_enabled<S: System>(&self) -> Result<bool> {
        let handle = self.handle_of::<S>()?;
        self.is_enabled_handle(handle)
    }

    /// Enable or disable the first registered system of type `S`
    pub fn set_enabled<S: System>(&mut self, enabled: bool) -> Result<()> {
        let handle = self.handle_of::<S>()?;
        self.set_enabled_handle(handle, enabled)
    }

    /// [`is_enabled`](Scheduler::is_enabled) for a runtime type id
    pub fn is_enabled_by_type(&self, type_id: TypeId) -> Result<bool> {
        let handle = self.handle_by_type(type_id, || format!("{:?}", type_id))?;
        self.is_enabled_handle(handle)
    }

    /// [`set_enabled`](Scheduler::set_enabled) for a runtime type id
    pub fn set_enabled_by_type(&mut self, type_id: TypeId, enabled: bool) -> Result<()> {
        let handle = self.handle_by_type(type_id, || format!("{:?}", type_id))?;
        self.set_enabled_handle(handle, enabled)
    }

    /// Enabled flag behind a handle
    pub fn is_enabled_handle(&self, handle: SystemHandle) -> Result<bool> {
        let partitions = self.partitions.as_ref().ok_or(SchedulerError::NotInitialized)?;
        check_generation(partitions, handle)?;
        partitions
            .is_enabled(handle)
            .ok_or_else(|| unknown_handle(handle))
    }

    /// Write the enabled flag behind a handle
    pub fn set_enabled_handle(&mut self, handle: SystemHandle, enabled: bool) -> Result<()> {
        let partitions = self.partitions.as_mut().ok_or(SchedulerError::NotInitialized)?;
        check_generation(partitions, handle)?;
        if !partitions.set_enabled(handle, enabled) {
            return Err(unknown_handle(handle));
        }
        log::debug!(
            "{} {}",
            if enabled { "Enabled" } else { "Disabled" },
            partitions.name(handle).unwrap_or("system")
        );
        Ok(())
    }

    fn handle_by_type(
        &self,
        type_id: TypeId,
        name: impl FnOnce() -> String,
    ) -> Result<SystemHandle> {
        let partitions = self.partitions.as_ref().ok_or(SchedulerError::NotInitialized)?;
        partitions
            .handle_of(type_id)
            .ok_or_else(|| SchedulerError::UnregisteredSystem { name: name() })
    }
}

/// Classify once; later calls return the existing partitions untouched
fn ensure_partitioned<'a>(
    slot: &'a mut Option<Partitioning>,
    systems: &[Box<dyn System>],
    generation: u32,
) -> &'a Partitioning {
    slot.get_or_insert_with(|| Partitioning::classify_generation(systems, generation))
}

/// Run every enabled system of a group, flushing after each one
fn run_group<H: SystemHost + ?Sized>(group: &Group, host: &mut H) -> usize {
    let mut ran = 0;
    for (entry, enabled) in group.iter() {
        if !enabled {
            continue;
        }
        // The slot must still hold the instance classified there; removing an
        // earlier system from the host shifts everything after it
        match host.systems_mut().get_mut(entry.host_index) {
            Some(system) if entry.matches(&**system) => system.process(),
            Some(system) => {
                log::warn!(
                    "System '{}' (index {}) was replaced by '{}' in the host; skipping",
                    entry.name,
                    entry.host_index,
                    system.name()
                );
                continue;
            }
            None => {
                log::warn!(
                    "System '{}' (index {}) is no longer registered with the host",
                    entry.name,
                    entry.host_index
                );
                continue;
            }
        }
        host.flush();
        ran += 1;
    }
    ran
}

fn check_generation(partitions: &Partitioning, handle: SystemHandle) -> Result<()> {
    if partitions.owns(handle) {
        Ok(())
    } else {
        Err(SchedulerError::StaleHandle {
            handle_generation: handle.generation(),
            current_generation: partitions.generation(),
        })
    }
}

fn unknown_handle(handle: SystemHandle) -> SchedulerError {
    SchedulerError::UnregisteredSystem {
        name: format!("{:?} system #{}", handle.step(), handle.index()),
    }
}
