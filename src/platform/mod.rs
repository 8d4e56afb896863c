//! Platform abstraction layer
//!
//! Frame-clock helpers shared by the browser and native drivers:
//! - `FixedStep` turns variable frame deltas into whole simulation ticks
//! - `FpsCounter` averages recent frame timestamps

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta fed to the accumulator (tab switches, debugger stops)
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds of real time and return how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DELTA);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        // Can't keep up: drop the backlog instead of spiralling
        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            self.accumulator %= SIM_DT;
        }
        steps
    }

    /// Forget pending time (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Rolling FPS estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the one we will overwrite next; the ring spans
        // one fewer interval than it has slots
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
