//! Demo host runtime
//!
//! Owns the registered systems and commits the world's pending commands after
//! every system the scheduler runs.

use std::time::Duration;

use tickloop_core::{System, SystemHost};

use crate::world::SharedWorld;

/// A [`SystemHost`] backed by a [`WorldState`](crate::world::WorldState)
pub struct DemoHost {
    systems: Vec<Box<dyn System>>,
    world: SharedWorld,
    /// Total flushes performed
    flushes: u64,
}

impl DemoHost {
    /// Create a host with no systems
    pub fn new(world: SharedWorld) -> Self {
        Self {
            systems: Vec::new(),
            world,
            flushes: 0,
        }
    }

    /// Register a system (builder form)
    pub fn with_system(mut self, system: impl System) -> Self {
        self.add_system(system);
        self
    }

    /// Register a system; execution order is registration order
    pub fn add_system(&mut self, system: impl System) {
        log::debug!("Registered system '{}'", system.name());
        self.systems.push(Box::new(system));
    }

    /// The shared world
    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// Number of flushes so far
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }
}

impl SystemHost for DemoHost {
    fn systems(&self) -> &[Box<dyn System>] {
        &self.systems
    }

    fn systems_mut(&mut self) -> &mut [Box<dyn System>] {
        &mut self.systems
    }

    fn flush(&mut self) {
        let applied = self.world.borrow_mut().flush();
        if applied > 0 {
            log::trace!("Flush committed {} commands", applied);
        }
        self.flushes += 1;
    }

    fn set_delta(&mut self, delta: Duration) {
        self.world.borrow_mut().set_delta(delta);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.world.borrow_mut().set_alpha(alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldState;
    use tickloop_core::Step;

    struct SpawnOne(SharedWorld);

    impl System for SpawnOne {
        fn process(&mut self) {
            self.0.borrow_mut().spawn(1.0);
        }

        fn step(&self) -> Step {
            Step::Fixed
        }
    }

    fn world() -> SharedWorld {
        WorldState::new(Duration::from_millis(40)).shared()
    }

    #[test]
    fn test_registration_order() {
        let world = world();
        let host = DemoHost::new(world.clone())
            .with_system(SpawnOne(world.clone()))
            .with_system(SpawnOne(world));
        assert_eq!(host.systems().len(), 2);
    }

    #[test]
    fn test_flush_commits_world() {
        let world = world();
        let mut host = DemoHost::new(world.clone()).with_system(SpawnOne(world.clone()));

        host.systems_mut()[0].process();
        assert!(world.borrow().bodies().is_empty());

        host.flush();
        assert_eq!(world.borrow().bodies().len(), 1);
        assert_eq!(host.flush_count(), 1);
    }

    #[test]
    fn test_timing_setters_reach_world() {
        let world = world();
        let mut host = DemoHost::new(world.clone());
        host.set_delta(Duration::from_millis(7));
        host.set_alpha(0.5);
        assert_eq!(world.borrow().delta(), Duration::from_millis(7));
        assert_eq!(world.borrow().alpha(), 0.5);
    }
}
