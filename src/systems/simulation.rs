//! Fixed-step simulation systems
//!
//! All three run once per tick, in registration order:
//! - [`Spawner`] queues a new body every few ticks
//! - [`Integrator`] moves committed bodies by the current delta
//! - [`Reaper`] queues removal of bodies that left the play area

use tickloop_core::{Step, System};

use crate::world::SharedWorld;

/// Queues a body every `every` ticks, alternating direction
pub struct Spawner {
    world: SharedWorld,
    every: u32,
    velocity: f64,
    counter: u32,
    flip: bool,
}

impl Spawner {
    /// Spawn at `velocity` units/second once every `every` ticks (minimum 1)
    pub fn new(world: SharedWorld, every: u32, velocity: f64) -> Self {
        Self {
            world,
            every: every.max(1),
            velocity,
            counter: 0,
            flip: false,
        }
    }
}

impl System for Spawner {
    fn process(&mut self) {
        self.counter += 1;
        if self.counter < self.every {
            return;
        }
        self.counter = 0;

        let velocity = if self.flip { -self.velocity } else { self.velocity };
        self.flip = !self.flip;
        self.world.borrow_mut().spawn(velocity);
    }

    fn step(&self) -> Step {
        Step::Fixed
    }

    fn name(&self) -> &str {
        "spawner"
    }
}

/// Advances committed bodies and counts ticks
pub struct Integrator {
    world: SharedWorld,
}

impl Integrator {
    pub fn new(world: SharedWorld) -> Self {
        Self { world }
    }
}

impl System for Integrator {
    fn process(&mut self) {
        let mut world = self.world.borrow_mut();
        let dt = world.delta().as_secs_f64();
        for body in world.bodies_mut() {
            body.position += body.velocity * dt;
        }
        world.advance_tick();
    }

    fn step(&self) -> Step {
        Step::Fixed
    }

    fn name(&self) -> &str {
        "integrator"
    }
}

/// Queues despawn of bodies farther than `bound` from the origin
pub struct Reaper {
    world: SharedWorld,
    bound: f64,
}

impl Reaper {
    pub fn new(world: SharedWorld, bound: f64) -> Self {
        Self { world, bound }
    }
}

impl System for Reaper {
    fn process(&mut self) {
        let mut world = self.world.borrow_mut();
        let gone: Vec<u64> = world
            .bodies()
            .iter()
            .filter(|b| b.position.abs() > self.bound)
            .map(|b| b.id)
            .collect();
        for id in gone {
            world.despawn(id);
        }
    }

    fn step(&self) -> Step {
        Step::Fixed
    }

    fn name(&self) -> &str {
        "reaper"
    }
}
