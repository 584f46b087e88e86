//! tickloop - fixed-timestep system scheduling
//!
//! The scheduler itself lives in [`tickloop_core`]; this crate adds layered
//! configuration and a small headless demo host.
//!
//! - [`config`] - `AppConfig` loaded from TOML files and environment
//! - [`world`] - Demo world with deferred spawn/despawn commands
//! - [`host`] - `DemoHost`, a `SystemHost` over that world
//! - [`systems`] - Demo fixed-step and variable-step systems

pub mod config;
pub mod host;
pub mod systems;
pub mod world;
