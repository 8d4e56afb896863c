//! The player's bird: flight physics and the death fall/bounce animation

use super::collision::{Rect, touches_ground};
use crate::assets::SpriteHandle;
use crate::consts::{
    BIRD_X, DEATH_TILT, GROUND_LINE, MIN_BOUNCE_VELOCITY, WINDOW_HEIGHT, WING_FRAME_TICKS,
};
use crate::tuning::Tuning;

/// Life/death sub-state of the bird
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathPhase {
    /// Flying under player control
    Alive,
    /// Dead and dropping toward the ground
    Falling { drop_velocity: f32 },
    /// Dead, on the ground, bouncing with decaying peaks
    Bouncing {
        bounces: u32,
        drop_velocity: f32,
        peak: f32,
    },
    /// Settled on the ground for good
    Resting,
}

/// Notable things that happened during a bird update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdEvent {
    /// A live bird flew into the ground and died
    HitGround,
    /// A falling dead bird reached the ground
    Landed,
    /// Another bounce started
    Bounced,
    /// The bounce sequence finished
    Settled,
}

#[derive(Debug, Clone)]
pub struct Bird {
    /// Fixed horizontal position
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Vertical velocity while alive (positive = down)
    pub velocity: f32,
    /// Visual rotation in degrees (positive = nose down)
    pub tilt: f32,
    pub phase: DeathPhase,
    /// Wing animation frame (0 or 1)
    pub wing_frame: u8,
    wing_ticks: u32,
    sprite: SpriteHandle,
}

impl Bird {
    pub fn new(sprite: SpriteHandle) -> Self {
        Self {
            x: BIRD_X,
            y: Self::spawn_y(),
            velocity: 0.0,
            tilt: 0.0,
            phase: DeathPhase::Alive,
            wing_frame: 0,
            wing_ticks: 0,
            sprite,
        }
    }

    fn spawn_y() -> f32 {
        (WINDOW_HEIGHT / 2.0).floor()
    }

    pub fn width(&self) -> f32 {
        self.sprite.width
    }

    pub fn height(&self) -> f32 {
        self.sprite.height
    }

    /// Hitbox (sprite bounds, ignores tilt)
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.sprite.width, self.sprite.height)
    }

    /// y at which the bird's bottom sits on the ground line
    pub fn rest_y(&self) -> f32 {
        GROUND_LINE - self.sprite.height
    }

    pub fn is_alive(&self) -> bool {
        self.phase == DeathPhase::Alive
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Dead and touching the ground (bouncing or resting)
    pub fn is_grounded(&self) -> bool {
        matches!(self.phase, DeathPhase::Bouncing { .. } | DeathPhase::Resting)
    }

    pub fn is_resting(&self) -> bool {
        self.phase == DeathPhase::Resting
    }

    /// Flap: velocity becomes the jump impulse (does not accumulate).
    /// Returns false (and changes nothing) if the bird is dead.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.velocity = tuning.jump_velocity;
        self.tilt = -tuning.max_tilt;
        true
    }

    /// Kill the bird in mid-air; it starts falling from rest.
    /// Returns false if it was already dead.
    pub fn kill(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.phase = DeathPhase::Falling { drop_velocity: 0.0 };
        true
    }

    /// Back to the spawn point, alive
    pub fn reset(&mut self) {
        self.y = Self::spawn_y();
        self.velocity = 0.0;
        self.tilt = 0.0;
        self.phase = DeathPhase::Alive;
        self.wing_frame = 0;
        self.wing_ticks = 0;
    }

    /// Advance one tick
    pub fn update(&mut self, tuning: &Tuning) -> Option<BirdEvent> {
        match self.phase {
            DeathPhase::Alive => self.update_alive(tuning),
            DeathPhase::Falling { drop_velocity } => self.update_falling(drop_velocity, tuning),
            DeathPhase::Bouncing {
                bounces,
                drop_velocity,
                peak,
            } => self.update_bouncing(bounces, drop_velocity, peak, tuning),
            DeathPhase::Resting => {
                self.y = self.rest_y();
                None
            }
        }
    }

    fn update_alive(&mut self, tuning: &Tuning) -> Option<BirdEvent> {
        self.velocity += tuning.gravity;
        self.y += self.velocity;

        // Ceiling stops the bird but is harmless
        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }

        self.tilt = (self.velocity * tuning.tilt_per_velocity)
            .clamp(-tuning.max_tilt, tuning.max_tilt);

        self.wing_ticks += 1;
        if self.wing_ticks >= WING_FRAME_TICKS {
            self.wing_ticks = 0;
            self.wing_frame ^= 1;
        }

        if touches_ground(&self.rect()) {
            self.land(tuning);
            return Some(BirdEvent::HitGround);
        }
        None
    }

    fn update_falling(&mut self, mut drop_velocity: f32, tuning: &Tuning) -> Option<BirdEvent> {
        drop_velocity += tuning.gravity * tuning.fall_multiplier;
        self.y += drop_velocity;
        self.rotate_toward_death_pose(tuning);

        if touches_ground(&self.rect()) {
            self.land(tuning);
            return Some(BirdEvent::Landed);
        }
        self.phase = DeathPhase::Falling { drop_velocity };
        None
    }

    fn update_bouncing(
        &mut self,
        mut bounces: u32,
        mut drop_velocity: f32,
        peak: f32,
        tuning: &Tuning,
    ) -> Option<BirdEvent> {
        drop_velocity += tuning.gravity * tuning.fall_multiplier;
        self.y += drop_velocity;
        self.rotate_toward_death_pose(tuning);

        if !touches_ground(&self.rect()) {
            self.phase = DeathPhase::Bouncing {
                bounces,
                drop_velocity,
                peak,
            };
            return None;
        }

        self.y = self.rest_y();
        bounces += 1;
        let next_peak = peak * tuning.bounce_decay;
        if bounces >= tuning.max_bounces || next_peak < MIN_BOUNCE_VELOCITY {
            self.phase = DeathPhase::Resting;
            self.tilt = DEATH_TILT;
            return Some(BirdEvent::Settled);
        }

        self.phase = DeathPhase::Bouncing {
            bounces,
            drop_velocity: -next_peak,
            peak: next_peak,
        };
        Some(BirdEvent::Bounced)
    }

    /// Clamp to the ground and start the first bounce
    fn land(&mut self, tuning: &Tuning) {
        self.y = self.rest_y();
        self.velocity = 0.0;
        if tuning.max_bounces == 0 {
            self.phase = DeathPhase::Resting;
            self.tilt = DEATH_TILT;
            return;
        }
        self.phase = DeathPhase::Bouncing {
            bounces: 0,
            drop_velocity: -tuning.bounce_velocity,
            peak: tuning.bounce_velocity,
        };
    }

    fn rotate_toward_death_pose(&mut self, tuning: &Tuning) {
        self.tilt = (self.tilt + tuning.death_rotation_speed).min(DEATH_TILT);
    }
}
