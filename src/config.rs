//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TICKLOOP_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;
use tickloop_core::{Scheduler, SchedulerConfig, SchedulerError};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fixed-timestep scheduler options
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Demo simulation options
    #[serde(default)]
    pub demo: DemoConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TICKLOOP_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // TICKLOOP_DEMO__FRAMES=10 -> demo.frames = 10
        figment = figment.merge(Env::prefixed("TICKLOOP_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the scheduler would refuse at construction
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler.tick_rate.tick_duration()?;
        Ok(())
    }

    /// Build a wall-clock scheduler from the `[scheduler]` section
    pub fn build_scheduler(&self) -> Result<Scheduler, ConfigError> {
        Ok(Scheduler::new(self.scheduler.clone())?)
    }
}

/// Demo simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of frames to run before exiting
    pub frames: u32,
    /// Sleep between frames in milliseconds (stands in for render time)
    pub frame_interval_ms: u64,
    /// Spawn a body every this many fixed ticks
    pub spawn_every_ticks: u32,
    /// Speed given to spawned bodies (units per second)
    pub spawn_velocity: f64,
    /// Bodies farther than this from the origin are despawned
    pub bound: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            frame_interval_ms: 16,
            spawn_every_ticks: 5,
            spawn_velocity: 4.0,
            bound: 20.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape
    #[error("Configuration error: {0}")]
    Load(#[from] figment::Error),

    /// The scheduler section was readable but invalid
    #[error("Configuration error: {0}")]
    Scheduler(#[from] SchedulerError),
}
