//! Demo simulation state
//!
//! A one-dimensional world of moving bodies. Systems never add or remove
//! bodies directly: they queue [`Command`]s, which become visible only after
//! [`WorldState::flush`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// World state shared between the host and its systems
pub type SharedWorld = Rc<RefCell<WorldState>>;

/// A moving point
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: u64,
    pub position: f64,
    /// Units per second
    pub velocity: f64,
}

/// A deferred structural change
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Spawn { velocity: f64 },
    Despawn(u64),
}

/// Bodies, pending commands and the timing values pushed in by the scheduler
#[derive(Debug)]
pub struct WorldState {
    bodies: Vec<Body>,
    pending: Vec<Command>,
    next_id: u64,
    /// Delta for the pass currently running
    delta: Duration,
    /// Interpolation factor after the last frame
    alpha: f64,
    /// Fixed ticks simulated so far
    ticks: u64,
    spawned: u64,
    despawned: u64,
}

impl WorldState {
    /// Create an empty world whose delta starts at one tick
    ///
    /// When the scheduler does not report deltas, fixed-step systems keep
    /// reading this value.
    pub fn new(tick: Duration) -> Self {
        Self {
            bodies: Vec::new(),
            pending: Vec::new(),
            next_id: 0,
            delta: tick,
            alpha: 0.0,
            ticks: 0,
            spawned: 0,
            despawned: 0,
        }
    }

    /// Wrap in the shared handle systems hold
    pub fn shared(self) -> SharedWorld {
        Rc::new(RefCell::new(self))
    }

    // --- Deferred mutation ---

    /// Queue a new body
    pub fn spawn(&mut self, velocity: f64) {
        self.pending.push(Command::Spawn { velocity });
    }

    /// Queue removal of a body
    pub fn despawn(&mut self, id: u64) {
        self.pending.push(Command::Despawn(id));
    }

    /// Commands queued since the last flush
    pub fn pending(&self) -> &[Command] {
        &self.pending
    }

    /// Apply every queued command, returning how many took effect
    ///
    /// Despawning an id that is already gone is ignored.
    pub fn flush(&mut self) -> usize {
        let mut applied = 0;
        for command in std::mem::take(&mut self.pending) {
            match command {
                Command::Spawn { velocity } => {
                    self.bodies.push(Body {
                        id: self.next_id,
                        position: 0.0,
                        velocity,
                    });
                    self.next_id += 1;
                    self.spawned += 1;
                    applied += 1;
                }
                Command::Despawn(id) => {
                    if let Some(i) = self.bodies.iter().position(|b| b.id == id) {
                        self.bodies.remove(i);
                        self.despawned += 1;
                        applied += 1;
                    }
                }
            }
        }
        applied
    }

    // --- Committed state ---

    /// Bodies as of the last flush
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable bodies (positions and velocities only; use commands to add or remove)
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Total bodies ever spawned
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Total bodies ever despawned
    pub fn despawned(&self) -> u64 {
        self.despawned
    }

    // --- Timing ---

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn set_delta(&mut self, delta: Duration) {
        self.delta = delta;
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Count one simulated tick
    pub fn advance_tick(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldState {
        WorldState::new(Duration::from_millis(40))
    }

    #[test]
    fn test_spawn_is_deferred_until_flush() {
        let mut world = world();
        world.spawn(1.0);
        world.spawn(2.0);
        assert!(world.bodies().is_empty());
        assert_eq!(world.pending().len(), 2);

        assert_eq!(world.flush(), 2);
        assert_eq!(world.bodies().len(), 2);
        assert!(world.pending().is_empty());
        assert_eq!(world.bodies()[0].id, 0);
        assert_eq!(world.bodies()[1].velocity, 2.0);
    }

    #[test]
    fn test_despawn() {
        let mut world = world();
        world.spawn(1.0);
        world.spawn(1.0);
        world.flush();

        world.despawn(0);
        assert_eq!(world.bodies().len(), 2);
        world.flush();
        assert_eq!(world.bodies().len(), 1);
        assert_eq!(world.bodies()[0].id, 1);
        assert_eq!(world.despawned(), 1);
    }

    #[test]
    fn test_double_despawn_is_ignored() {
        let mut world = world();
        world.spawn(1.0);
        world.flush();
        world.despawn(0);
        world.despawn(0);
        assert_eq!(world.flush(), 1);
        assert_eq!(world.despawned(), 1);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut world = world();
        world.spawn(1.0);
        world.flush();
        world.despawn(0);
        world.spawn(1.0);
        world.flush();
        assert_eq!(world.bodies()[0].id, 1);
        assert_eq!(world.spawned(), 2);
    }

    #[test]
    fn test_delta_starts_at_tick() {
        let mut world = world();
        assert_eq!(world.delta(), Duration::from_millis(40));
        world.set_delta(Duration::from_millis(16));
        assert_eq!(world.delta(), Duration::from_millis(16));
    }

    #[test]
    fn test_advance_tick() {
        let mut world = world();
        assert_eq!(world.advance_tick(), 1);
        assert_eq!(world.advance_tick(), 2);
        assert_eq!(world.ticks(), 2);
    }
}
