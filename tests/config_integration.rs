//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::time::Duration;

use tickloop::config::{AppConfig, ConfigError};
use tickloop_core::TickRate;
use serial_test::serial;

#[test]
#[serial]
fn test_default_file_is_loaded() {
    let config = AppConfig::load().unwrap();
    assert_eq!(config.scheduler.tick_rate, TickRate::MillisPerTick(40.0));
    assert!(config.scheduler.report_delta);
    assert!(config.scheduler.expose_alpha);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("TICKLOOP_DEMO__FRAMES", "7");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("TICKLOOP_DEMO__FRAMES");
    assert_eq!(config.demo.frames, 7);
}

#[test]
#[serial]
fn test_env_tick_rate_override() {
    std::env::set_var("TICKLOOP_SCHEDULER__TICK_RATE__MILLIS_PER_TICK", "20");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("TICKLOOP_SCHEDULER__TICK_RATE__MILLIS_PER_TICK");

    let scheduler = config.build_scheduler().unwrap();
    assert_eq!(scheduler.tick_duration(), Duration::from_millis(20));
}

#[test]
#[serial]
fn test_invalid_tick_rate_is_rejected() {
    std::env::set_var("TICKLOOP_SCHEDULER__TICK_RATE__MILLIS_PER_TICK", "0");
    let result = AppConfig::load();
    std::env::remove_var("TICKLOOP_SCHEDULER__TICK_RATE__MILLIS_PER_TICK");

    assert!(matches!(result, Err(ConfigError::Scheduler(_))));
}

#[test]
#[serial]
fn test_user_config_loading() {
    let dir = std::env::temp_dir().join(format!("tickloop-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("default.toml"),
        "[demo]\nframes = 10\nbound = 5.0\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("user.toml"),
        "[demo]\nframes = 3\n\n[scheduler.tick_rate]\nticks_per_second = 50.0\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    // user.toml wins, default.toml fills the rest
    assert_eq!(config.demo.frames, 3);
    assert_eq!(config.demo.bound, 5.0);
    assert_eq!(config.scheduler.tick_rate, TickRate::TicksPerSecond(50.0));
}

/// Temp config dir seeded with the shipped `config/default.toml`
fn dir_with_shipped_defaults(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("tickloop-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::copy("config/default.toml", dir.join("default.toml")).unwrap();
    dir
}

#[test]
#[serial]
fn test_user_config_switches_tick_rate_unit() {
    let dir = dir_with_shipped_defaults("switch-unit");
    std::fs::write(
        dir.join("user.toml"),
        "[scheduler.tick_rate]\nticks_per_second = 60.0\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.scheduler.tick_rate, TickRate::TicksPerSecond(60.0));
    let scheduler = config.build_scheduler().unwrap();
    assert_eq!(scheduler.tick_duration(), Duration::from_nanos(16_666_667));
}

#[test]
#[serial]
fn test_env_switches_tick_rate_unit() {
    std::env::set_var("TICKLOOP_SCHEDULER__TICK_RATE__TICKS_PER_SECOND", "50");
    let config = AppConfig::load();
    std::env::remove_var("TICKLOOP_SCHEDULER__TICK_RATE__TICKS_PER_SECOND");

    assert_eq!(config.unwrap().scheduler.tick_rate, TickRate::TicksPerSecond(50.0));
}

#[test]
#[serial]
fn test_env_tick_rate_string() {
    std::env::set_var("TICKLOOP_SCHEDULER__TICK_RATE", "50hz");
    let config = AppConfig::load();
    std::env::remove_var("TICKLOOP_SCHEDULER__TICK_RATE");

    assert_eq!(config.unwrap().scheduler.tick_rate, TickRate::TicksPerSecond(50.0));
}

#[test]
#[serial]
fn test_conflicting_tick_rate_units_are_rejected() {
    let dir = dir_with_shipped_defaults("conflict");
    std::fs::write(
        dir.join("user.toml"),
        "[scheduler.tick_rate]\nticks_per_second = 60.0\n",
    )
    .unwrap();
    // Merges into the user's table rather than replacing it
    std::env::set_var("TICKLOOP_SCHEDULER__TICK_RATE__MILLIS_PER_TICK", "20");
    let result = AppConfig::load_from(&dir);
    std::env::remove_var("TICKLOOP_SCHEDULER__TICK_RATE__MILLIS_PER_TICK");
    std::fs::remove_dir_all(&dir).unwrap();

    assert!(matches!(result, Err(ConfigError::Load(_))));
}
