//! Collision detection for the bird against pipes and the ground
//!
//! Everything is axis-aligned: the bird hitbox is its sprite bounds (tilt is
//! visual only), a pipe is two rectangles around its gap, and the ground is
//! a horizontal line.

use glam::Vec2;

use super::pipe::Pipe;
use crate::consts::{GROUND_LINE, PIPE_WIDTH, WINDOW_HEIGHT};

/// Axis-aligned rectangle (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test; rectangles that only touch edges do not
    /// intersect, and a zero-sized rectangle never intersects anything
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Which pipe segment was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeSegment {
    Upper,
    Lower,
}

/// A detected bird/pipe overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeHit {
    pub segment: PipeSegment,
    /// Where the impact effect is spawned
    pub point: Vec2,
}

/// Upper and lower segment rectangles of a pipe
pub fn pipe_rects(pipe: &Pipe, gap: i32) -> (Rect, Rect) {
    let gap_top = pipe.gap_top as f32;
    let gap_bottom = (pipe.gap_top + gap) as f32;
    let upper = Rect::new(pipe.x, 0.0, PIPE_WIDTH, gap_top);
    let lower = Rect::new(pipe.x, gap_bottom, PIPE_WIDTH, WINDOW_HEIGHT - gap_bottom);
    (upper, lower)
}

/// Check the bird against both segments of a pipe (upper first)
pub fn bird_pipe_collision(bird: &Rect, pipe: &Pipe, gap: i32) -> Option<PipeHit> {
    let (upper, lower) = pipe_rects(pipe, gap);

    if bird.intersects(&upper) {
        return Some(PipeHit {
            segment: PipeSegment::Upper,
            point: Vec2::new(bird.left().max(upper.left()), bird.top().max(upper.top())),
        });
    }

    if bird.intersects(&lower) {
        return Some(PipeHit {
            segment: PipeSegment::Lower,
            point: Vec2::new(bird.left().max(lower.left()), bird.bottom().min(lower.bottom())),
        });
    }

    None
}

/// Whether the bird's bottom edge has reached the ground line
#[inline]
pub fn touches_ground(bird: &Rect) -> bool {
    bird.bottom() >= GROUND_LINE
}
