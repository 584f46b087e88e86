//! Scheduler error types

use thiserror::Error;

/// Errors raised by scheduler construction and enable/disable control
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SchedulerError {
    /// Tick duration is zero, negative, or not a finite number
    #[error("Invalid tick duration: {0}")]
    InvalidTickDuration(String),

    /// The system was never classified by this scheduler
    #[error("System not registered with the scheduler: {name}")]
    UnregisteredSystem { name: String },

    /// Enable/disable was used before the systems were classified
    #[error("Systems have not been classified yet; call initialize() or process() first")]
    NotInitialized,

    /// The handle was issued before the last `reset` and may point elsewhere
    #[error("Stale system handle from generation {handle_generation} (current generation {current_generation})")]
    StaleHandle {
        handle_generation: u32,
        current_generation: u32,
    },
}

/// Result type alias for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;
