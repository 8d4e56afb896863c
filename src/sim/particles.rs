//! Visual-only particles (impact sparks, feathers, ground dust)
//!
//! Particles never feed back into gameplay. They draw from their own RNG
//! stream so spawning them cannot change where pipes appear.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// What a particle represents (renderer picks the colour)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Impact,
    /// Feather shade index (0-2)
    Feather(u8),
    /// Dust shade index (0-2)
    Dust(u8),
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub size: f32,
    initial_size: f32,
    /// Alpha, 255 = opaque
    pub life: f32,
    fade_speed: f32,
    life_span: u32,
    age: u32,
}

impl Particle {
    fn new(
        kind: ParticleKind,
        pos: Vec2,
        vel: Vec2,
        gravity: f32,
        size: f32,
        fade_speed: f32,
        life_span: u32,
    ) -> Self {
        Self {
            kind,
            pos,
            vel,
            gravity,
            size,
            initial_size: size,
            life: 255.0,
            fade_speed,
            life_span,
            age: 0,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.life = (self.life - self.fade_speed).max(0.0);

        // Shrink linearly over the life span
        self.size = if self.age < self.life_span {
            self.initial_size * (1.0 - self.age as f32 / self.life_span as f32)
        } else {
            0.0
        };
        self.age += 1;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0 && self.age < self.life_span
    }

    /// Opacity in 0..=1
    pub fn alpha(&self) -> f32 {
        (self.life / 255.0).clamp(0.0, 1.0)
    }
}

/// Drop dead particles, then advance the survivors
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain(Particle::is_alive);
    for particle in particles.iter_mut() {
        particle.update();
    }
}

fn push_capped(particles: &mut Vec<Particle>, particle: Particle) {
    if particles.len() < MAX_PARTICLES {
        particles.push(particle);
    }
}

/// Sparks at the point the bird struck a pipe
pub fn emit_impact(particles: &mut Vec<Particle>, rng: &mut Pcg32, at: Vec2, count: usize) {
    for _ in 0..count {
        let vel = Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0));
        let particle = Particle::new(
            ParticleKind::Impact,
            at,
            vel,
            0.2,
            rng.random_range(1.0..4.0),
            rng.random_range(2.0..5.0),
            rng.random_range(30..=60),
        );
        push_capped(particles, particle);
    }
}

/// Slow-falling feathers from the bird's centre
pub fn emit_feathers(particles: &mut Vec<Particle>, rng: &mut Pcg32, at: Vec2, count: usize) {
    for _ in 0..count {
        let vel = Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0));
        let particle = Particle::new(
            ParticleKind::Feather(rng.random_range(0..3)),
            at,
            vel,
            0.05,
            rng.random_range(1.0..3.0),
            rng.random_range(1.0..3.0),
            rng.random_range(60..=120),
        );
        push_capped(particles, particle);
    }
}

/// Dust kicked up along the ground, mostly sideways and upward
pub fn emit_dust(particles: &mut Vec<Particle>, rng: &mut Pcg32, at: Vec2, count: usize) {
    for _ in 0..count {
        let pos = at + Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-2.0..2.0));
        let vel = Vec2::new(rng.random_range(-5.0..5.0), rng.random_range(-2.0..0.0));
        let particle = Particle::new(
            ParticleKind::Dust(rng.random_range(0..3)),
            pos,
            vel,
            0.1,
            rng.random_range(1.0..3.0),
            rng.random_range(3.0..6.0),
            rng.random_range(20..=40),
        );
        push_capped(particles, particle);
    }
}
