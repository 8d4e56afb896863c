//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies

pub mod bird;
pub mod collision;
pub mod particles;
pub mod pipe;
pub mod state;
pub mod tick;

pub use bird::{Bird, BirdEvent, DeathPhase};
pub use collision::{PipeHit, PipeSegment, Rect, bird_pipe_collision, pipe_rects, touches_ground};
pub use particles::{MAX_PARTICLES, Particle, ParticleKind};
pub use pipe::{Pipe, PipeSpawner};
pub use state::{BirdView, GameCore, GameEvent, GamePhase, PipeView, Snapshot};
pub use tick::{TickInput, tick};
