//! Data-driven game balance
//!
//! Every physics and pacing number the simulation reads lives here so a
//! JSON file can override it without a rebuild. Geometry (screen, sprite and
//! pipe sizes) stays in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ms_to_ticks;

/// Errors produced while loading or validating tuning data
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A value is outside its legal range
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "Tuning parse error: {}", e),
            TuningError::Invalid(reason) => write!(f, "Invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {}

impl From<serde_json::Error> for TuningError {
    fn from(error: serde_json::Error) -> Self {
        TuningError::Parse(error)
    }
}

/// Gameplay constants, all in per-tick units unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    /// Velocity set by a jump (negative = up)
    pub jump_velocity: f32,
    /// Tilt clamp in degrees
    pub max_tilt: f32,
    pub tilt_per_velocity: f32,

    // === Death animation ===
    pub fall_multiplier: f32,
    /// Degrees per tick toward the vertical death pose
    pub death_rotation_speed: f32,
    pub bounce_velocity: f32,
    /// Each bounce peak = previous peak * decay
    pub bounce_decay: f32,
    pub max_bounces: u32,

    // === Pipes ===
    pub pipe_speed: f32,
    pub pipe_gap: i32,
    pub pipe_min_margin: i32,
    /// Wall-clock spawn interval (milliseconds)
    pub spawn_interval_ms: u32,

    pub background_scroll_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            max_tilt: MAX_TILT,
            tilt_per_velocity: TILT_PER_VELOCITY,

            fall_multiplier: DEATH_FALL_MULTIPLIER,
            death_rotation_speed: DEATH_ROTATION_SPEED,
            bounce_velocity: BOUNCE_VELOCITY,
            bounce_decay: BOUNCE_DECAY,
            max_bounces: MAX_BOUNCES,

            pipe_speed: PIPE_SPEED,
            pipe_gap: PIPE_GAP,
            pipe_min_margin: PIPE_MIN_MARGIN,
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,

            background_scroll_speed: BACKGROUND_SCROLL_SPEED,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value keeps the simulation well-formed
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.gravity > 0.0) {
            return Err(TuningError::Invalid("gravity must be positive"));
        }
        if !(self.jump_velocity < 0.0) {
            return Err(TuningError::Invalid("jump_velocity must be negative"));
        }
        if !(self.bounce_decay > 0.0 && self.bounce_decay < 1.0) {
            return Err(TuningError::Invalid("bounce_decay must be in (0, 1)"));
        }
        if !(self.pipe_speed > 0.0) {
            return Err(TuningError::Invalid("pipe_speed must be positive"));
        }
        if self.pipe_gap <= 0 || self.pipe_min_margin <= 0 {
            return Err(TuningError::Invalid("pipe_gap and pipe_min_margin must be positive"));
        }
        let (min, max) = self.gap_range();
        if min > max {
            return Err(TuningError::Invalid("pipe gap leaves no room for both segments"));
        }
        if self.spawn_interval_ms == 0 {
            return Err(TuningError::Invalid("spawn_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Inclusive range of legal gap top offsets
    pub fn gap_range(&self) -> (i32, i32) {
        let min = self.pipe_min_margin;
        let max =
            WINDOW_HEIGHT as i32 - self.pipe_gap - GROUND_HEIGHT as i32 - self.pipe_min_margin;
        (min, max)
    }

    /// Spawn interval expressed in fixed ticks
    pub fn spawn_interval_ticks(&self) -> u32 {
        ms_to_ticks(self.spawn_interval_ms)
    }

    /// Load tuning from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("{} in {}, using defaults", e, path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
