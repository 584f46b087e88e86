//! Per-frame reporting

use tickloop_core::System;

use crate::world::SharedWorld;

/// Variable-step system that logs world statistics every `interval` frames
pub struct FrameReporter {
    world: SharedWorld,
    interval: u64,
    frames: u64,
}

impl FrameReporter {
    pub fn new(world: SharedWorld, interval: u64) -> Self {
        Self {
            world,
            interval: interval.max(1),
            frames: 0,
        }
    }

    /// Frames seen so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl System for FrameReporter {
    fn process(&mut self) {
        self.frames += 1;
        if self.frames % self.interval != 0 {
            return;
        }

        let world = self.world.borrow();
        log::info!(
            "frame {}: tick {}, {} bodies (+{} / -{}), delta {:?}, alpha {:.2}",
            self.frames,
            world.ticks(),
            world.bodies().len(),
            world.spawned(),
            world.despawned(),
            world.delta(),
            world.alpha()
        );
    }

    fn name(&self) -> &str {
        "frame_reporter"
    }
}
