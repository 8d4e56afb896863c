//! Sprite handles supplied to the simulation
//!
//! The simulation never decodes or owns image data. It only needs to know a
//! sprite's pixel size: the bird hitbox is the bird sprite's bounds.

use crate::consts::{BIRD_HEIGHT, BIRD_WIDTH};

/// Opaque drawable with known pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteHandle {
    pub id: u32,
    pub width: f32,
    pub height: f32,
}

impl SpriteHandle {
    pub const fn new(id: u32, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }
}

/// Everything the game needs from the asset provider
#[derive(Debug, Clone, Copy)]
pub struct Assets {
    pub bird: SpriteHandle,
}

impl Assets {
    pub const BIRD_SPRITE: u32 = 1;

    /// Procedurally drawn sprites at the standard sizes
    pub fn builtin() -> Self {
        Self {
            bird: SpriteHandle::new(Self::BIRD_SPRITE, BIRD_WIDTH, BIRD_HEIGHT),
        }
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::builtin()
    }
}
