//! Flappy - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, collisions, game phases)
//! - `highscores`: Current score and persisted best score
//! - `persistence`: High score storage backends (file, LocalStorage, memory)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Fixed-rate timing source
//! - `tuning`: Data-driven game balance
//! - `ui`: Death screen overlay and HUD text

pub mod assets;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use assets::{Assets, SpriteHandle};
pub use highscores::ScoreStore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 30;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const WINDOW_WIDTH: f32 = 720.0;
    pub const WINDOW_HEIGHT: f32 = 740.0;
    pub const GROUND_HEIGHT: f32 = 100.0;
    /// Top of the ground band; the bird dies when its bottom reaches it
    pub const GROUND_LINE: f32 = WINDOW_HEIGHT - GROUND_HEIGHT;

    /// Bird sprite size and fixed horizontal position
    pub const BIRD_WIDTH: f32 = 50.0;
    pub const BIRD_HEIGHT: f32 = 40.0;
    pub const BIRD_X: f32 = 50.0;
    /// Ticks per wing frame
    pub const WING_FRAME_TICKS: u32 = 5;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 80.0;
    pub const PIPE_GAP: i32 = 150;
    /// Smallest allowed height of either pipe segment
    pub const PIPE_MIN_MARGIN: i32 = 50;
    pub const PIPE_SPEED: f32 = 8.0;
    pub const PIPE_SPAWN_INTERVAL_MS: u32 = 1500;

    /// Bird physics (length units per tick)
    pub const GRAVITY: f32 = 0.9;
    pub const JUMP_VELOCITY: f32 = -12.0;
    /// Tilt limits in degrees (positive = nose down)
    pub const MAX_TILT: f32 = 25.0;
    pub const TILT_PER_VELOCITY: f32 = 3.0;

    /// Death animation
    pub const DEATH_FALL_MULTIPLIER: f32 = 1.5;
    pub const DEATH_ROTATION_SPEED: f32 = 10.0;
    pub const DEATH_TILT: f32 = 90.0;
    pub const BOUNCE_VELOCITY: f32 = 6.0;
    pub const BOUNCE_DECAY: f32 = 0.5;
    pub const MAX_BOUNCES: u32 = 3;
    /// Bounces weaker than this settle immediately
    pub const MIN_BOUNCE_VELOCITY: f32 = 0.5;

    /// Background parallax scroll (pixels per tick)
    pub const BACKGROUND_SCROLL_SPEED: f32 = 1.0;

    /// Death screen: wait after settling, then fade in
    pub const DEATH_SCREEN_DELAY_MS: u32 = 1000;
    pub const OVERLAY_FADE_STEP: u8 = 5;
    pub const OVERLAY_SHOW_ALPHA: u8 = 128;
    pub const OVERLAY_MAX_ALPHA: u8 = 180;
}

/// Convert a wall-clock duration to whole simulation ticks (at least one)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    let ticks = (ms as u64 * consts::TICK_RATE_HZ as u64 + 500) / 1000;
    (ticks as u32).max(1)
}
