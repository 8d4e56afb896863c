//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.31, 0.75, 0.79, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.62, 0.88, 0.86, 1.0];
    pub const CLOUD: [f32; 4] = [0.95, 0.97, 0.98, 0.9];
    pub const GROUND: [f32; 4] = [0.87, 0.84, 0.59, 1.0];
    pub const GRASS: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const PIPE: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const PIPE_CAP: [f32; 4] = [0.36, 0.62, 0.13, 1.0];
    pub const BIRD_BODY: [f32; 4] = [0.98, 0.78, 0.16, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.99, 0.93, 0.72, 1.0];
    pub const BIRD_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD_PUPIL: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [0.96, 0.42, 0.16, 1.0];
    pub const IMPACT: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const FEATHERS: [[f32; 4]; 3] = [
        [0.98, 0.78, 0.16, 1.0],
        [0.99, 0.88, 0.45, 1.0],
        [0.93, 0.62, 0.10, 1.0],
    ];
    pub const DUST: [[f32; 4]; 3] = [
        [0.80, 0.72, 0.50, 1.0],
        [0.70, 0.62, 0.42, 1.0],
        [0.88, 0.82, 0.62, 1.0],
    ];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
