//! Pipes and the timer that spawns them

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{PIPE_WIDTH, WINDOW_WIDTH};
use crate::tuning::Tuning;

/// A pipe pair with a passable gap
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: u32,
    /// Left edge, decreasing every tick
    pub x: f32,
    /// Height of the upper segment (top of the gap)
    pub gap_top: i32,
    /// Set once the pipe's trailing edge is behind the bird
    pub passed: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, gap_top: i32) -> Self {
        Self {
            id,
            x,
            gap_top,
            passed: false,
        }
    }

    /// Scroll left by one tick
    pub fn update(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Mark the pipe passed if its trailing edge is left of `bird_x`.
    /// Returns true only on the tick the pipe becomes passed.
    pub fn mark_passed(&mut self, bird_x: f32) -> bool {
        if !self.passed && self.right() < bird_x {
            self.passed = true;
            return true;
        }
        false
    }

    /// Entirely scrolled past the left boundary
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Fixed-interval pipe spawner (counts simulation ticks)
#[derive(Debug, Clone)]
pub struct PipeSpawner {
    interval_ticks: u32,
    elapsed_ticks: u32,
}

impl PipeSpawner {
    pub fn new(interval_ticks: u32) -> Self {
        Self {
            interval_ticks: interval_ticks.max(1),
            elapsed_ticks: 0,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.spawn_interval_ticks())
    }

    /// Restart the interval (a new run waits a full interval for its first pipe)
    pub fn reset(&mut self) {
        self.elapsed_ticks = 0;
    }

    /// Advance one tick; returns true when a pipe should spawn
    pub fn tick(&mut self) -> bool {
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.interval_ticks {
            self.elapsed_ticks = 0;
            return true;
        }
        false
    }

    /// Create a pipe at the right edge with a uniformly random gap offset
    pub fn spawn(&self, id: u32, rng: &mut Pcg32, tuning: &Tuning) -> Pipe {
        let (min, max) = tuning.gap_range();
        let gap_top = rng.random_range(min..=max.max(min));
        log::debug!("Spawning pipe {} with gap top {}", id, gap_top);
        Pipe::new(id, WINDOW_WIDTH, gap_top)
    }
}
