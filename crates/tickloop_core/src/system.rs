//! System and host contracts

use std::any::Any;
use std::time::Duration;

/// Which group a system is scheduled in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Run once per tick of accumulated time (zero, one or many times a frame)
    Fixed,
    /// Run exactly once per frame
    Variable,
}

/// A unit of work driven by the scheduler
///
/// Systems are executed in the order the host registered them. A system opts
/// into fixed-step scheduling by returning [`Step::Fixed`] from [`step`];
/// the answer is read once, when the scheduler classifies the host's systems.
///
/// [`step`]: System::step
pub trait System: Any {
    /// Do one unit of work
    fn process(&mut self);

    /// Scheduling group for this system
    fn step(&self) -> Step {
        Step::Variable
    }

    /// Human-readable name, used in logs and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// The runtime that owns the systems and the entity state they mutate
///
/// The scheduler never stores systems itself; it keeps indices into
/// [`systems`](SystemHost::systems) recorded at classification time.
pub trait SystemHost {
    /// Registered systems in execution order
    fn systems(&self) -> &[Box<dyn System>];

    /// Mutable access to the registered systems
    fn systems_mut(&mut self) -> &mut [Box<dyn System>];

    /// Commit pending entity mutations
    ///
    /// Called after every individual system execution so the next system in
    /// the same pass observes what the previous one changed.
    fn flush(&mut self);

    /// Receive the delta the upcoming pass simulates
    ///
    /// Only called when delta reporting is enabled: the tick duration before
    /// the fixed-step passes, then the frame time before the variable pass.
    fn set_delta(&mut self, _delta: Duration) {}

    /// Receive the interpolation factor after a frame
    ///
    /// Only called when alpha exposure is enabled.
    fn set_alpha(&mut self, _alpha: f64) {}
}
