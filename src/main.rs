//! tickloop - headless fixed-timestep demo
//!
//! Runs a small simulation for the configured number of frames, sleeping
//! between frames to stand in for presentation work.

use std::time::{Duration, Instant};

use tickloop::config::AppConfig;
use tickloop::host::DemoHost;
use tickloop::systems::{FrameReporter, Integrator, Reaper, Spawner};
use tickloop::world::WorldState;

fn main() {
    // Load configuration before logging so the configured level applies
    let loaded = AppConfig::load();
    let level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Starting tickloop");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut scheduler = match config.build_scheduler() {
        Ok(scheduler) => scheduler,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Register systems; fixed-step and variable-step may interleave
    let demo = &config.demo;
    let world = WorldState::new(scheduler.tick_duration()).shared();
    let mut host = DemoHost::new(world.clone())
        .with_system(Spawner::new(world.clone(), demo.spawn_every_ticks, demo.spawn_velocity))
        .with_system(FrameReporter::new(world.clone(), 30))
        .with_system(Integrator::new(world.clone()))
        .with_system(Reaper::new(world.clone(), demo.bound));

    scheduler.initialize(&host);
    if let Some(parts) = scheduler.partitions() {
        log::info!(
            "Tick {:?}: fixed [{}], variable [{}]",
            scheduler.tick_duration(),
            parts.fixed().names().collect::<Vec<_>>().join(", "),
            parts.variable().names().collect::<Vec<_>>().join(", ")
        );
    }

    let interval = Duration::from_millis(demo.frame_interval_ms);
    let started = Instant::now();
    let mut fixed_passes = 0u64;
    for _ in 0..demo.frames {
        std::thread::sleep(interval);
        let stats = scheduler.process(&mut host);
        fixed_passes += u64::from(stats.fixed_passes);
    }

    let world = world.borrow();
    log::info!(
        "Ran {} frames in {:?}: {} fixed passes, {} flushes, {} bodies alive",
        demo.frames,
        started.elapsed(),
        fixed_passes,
        host.flush_count(),
        world.bodies().len()
    );
}
