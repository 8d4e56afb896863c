//! Shape generation for 2D primitives and the full game scene
//!
//! Everything here works in world pixels (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{GROUND_HEIGHT, GROUND_LINE, PIPE_WIDTH, WINDOW_WIDTH};
use crate::settings::Settings;
use crate::sim::{BirdView, GamePhase, ParticleKind, PipeView, Snapshot};

/// Lip drawn at the open end of each pipe
const PIPE_CAP_HEIGHT: f32 = 24.0;
const PIPE_CAP_OVERHANG: f32 = 4.0;

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Two triangles from four corners (clockwise or counter-clockwise)
fn quad(corners: [Vec2; 4], colors: [[f32; 4]; 4]) -> [Vertex; 6] {
    let v = |i: usize| Vertex::new(corners[i].x, corners[i].y, colors[i]);
    [v(0), v(1), v(2), v(2), v(3), v(0)]
}

/// Axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(x, y, w, h, color, color)
}

/// Rectangle shaded from `top` to `bottom`
pub fn gradient_rect(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) -> Vec<Vertex> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }
    quad(
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ],
        [top, top, bottom, bottom],
    )
    .to_vec()
}

/// Rectangle of `size` centered at `center + offset.rotate(angle)`, rotated by `angle`
pub fn rotated_rect(
    center: Vec2,
    offset: Vec2,
    size: Vec2,
    angle: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let half = size * 0.5;
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|c| center + rot.rotate(offset + c));
    quad(corners, [color; 4]).to_vec()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Sky gradient plus a few clouds, drawn twice for seamless wrapping
fn sky(offset: f32, clouds: bool) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for copy in [offset, offset + WINDOW_WIDTH] {
        vertices.extend(gradient_rect(
            copy,
            0.0,
            WINDOW_WIDTH,
            GROUND_LINE,
            colors::SKY_TOP,
            colors::SKY_BOTTOM,
        ));
        if clouds {
            let puffs = [(120.0, 140.0, 34.0), (330.0, 90.0, 26.0), (560.0, 170.0, 40.0)];
            for (cx, cy, r) in puffs {
                let c = Vec2::new(copy + cx, cy);
                vertices.extend(circle(c, r, colors::CLOUD, 16));
                vertices.extend(circle(c + Vec2::new(r, 8.0), r * 0.75, colors::CLOUD, 16));
                vertices.extend(circle(c - Vec2::new(r, -8.0), r * 0.7, colors::CLOUD, 16));
            }
        }
    }
    vertices
}

fn pipe(view: &PipeView) -> Vec<Vertex> {
    let gap_top = view.gap_top as f32;
    let gap_bottom = (view.gap_top + view.gap) as f32;
    let cap_x = view.x - PIPE_CAP_OVERHANG;
    let cap_w = PIPE_WIDTH + PIPE_CAP_OVERHANG * 2.0;

    let mut vertices = rect(view.x, 0.0, PIPE_WIDTH, gap_top, colors::PIPE);
    let lower_h = GROUND_LINE - gap_bottom;
    vertices.extend(rect(view.x, gap_bottom, PIPE_WIDTH, lower_h, colors::PIPE));
    let cap_top = gap_top - PIPE_CAP_HEIGHT;
    vertices.extend(rect(cap_x, cap_top, cap_w, PIPE_CAP_HEIGHT, colors::PIPE_CAP));
    vertices.extend(rect(cap_x, gap_bottom, cap_w, PIPE_CAP_HEIGHT, colors::PIPE_CAP));
    vertices
}

fn ground() -> Vec<Vertex> {
    let mut vertices = rect(0.0, GROUND_LINE, WINDOW_WIDTH, GROUND_HEIGHT, colors::GROUND);
    vertices.extend(rect(0.0, GROUND_LINE, WINDOW_WIDTH, 12.0, colors::GRASS));
    vertices
}

/// Bird body, wing, eye and beak, rotated by its tilt about its centre
fn bird(view: &BirdView) -> Vec<Vertex> {
    let size = Vec2::new(view.width, view.height);
    let center = Vec2::new(view.x, view.y) + size * 0.5;
    let angle = view.tilt.to_radians();
    let rot = Vec2::from_angle(angle);

    let mut vertices = rotated_rect(center, Vec2::ZERO, size, angle, colors::BIRD_BODY);

    let wing_y = if view.wing_frame == 0 { -2.0 } else { 8.0 };
    vertices.extend(rotated_rect(
        center,
        Vec2::new(-8.0, wing_y),
        Vec2::new(20.0, 12.0),
        angle,
        colors::BIRD_WING,
    ));

    let eye = center + rot.rotate(Vec2::new(size.x * 0.25, -size.y * 0.2));
    vertices.extend(circle(eye, 7.0, colors::BIRD_EYE, 12));
    let pupil = if view.alive { 3.0 } else { 1.5 };
    vertices.extend(circle(eye + rot.rotate(Vec2::new(2.0, 0.0)), pupil, colors::BIRD_PUPIL, 8));

    vertices.extend(rotated_rect(
        center,
        Vec2::new(size.x * 0.5 + 4.0, 4.0),
        Vec2::new(14.0, 8.0),
        angle,
        colors::BIRD_BEAK,
    ));
    vertices
}

fn particle_color(kind: ParticleKind) -> [f32; 4] {
    match kind {
        ParticleKind::Impact => colors::IMPACT,
        ParticleKind::Feather(shade) => colors::FEATHERS[shade as usize % colors::FEATHERS.len()],
        ParticleKind::Dust(shade) => colors::DUST[shade as usize % colors::DUST.len()],
    }
}

/// Build every triangle of one frame, back to front
pub fn build_scene(snapshot: &Snapshot, settings: &Settings, overlay_alpha: u8) -> Vec<Vertex> {
    let mut vertices = sky(
        settings.effective_background_x(snapshot.background_x),
        settings.quality.clouds_enabled(),
    );

    for view in &snapshot.pipes {
        vertices.extend(pipe(view));
    }
    vertices.extend(ground());

    for particle in snapshot.particles.iter().take(settings.max_particles()) {
        if particle.size <= 0.0 {
            continue;
        }
        let color = with_alpha(particle_color(particle.kind), particle.alpha());
        vertices.extend(circle(particle.pos, particle.size, color, 6));
    }

    if snapshot.phase != GamePhase::Menu {
        vertices.extend(bird(&snapshot.bird));
    }

    if overlay_alpha > 0 {
        let alpha = overlay_alpha as f32 / 255.0;
        vertices.extend(rect(
            0.0,
            0.0,
            WINDOW_WIDTH,
            GROUND_LINE + GROUND_HEIGHT,
            with_alpha(colors::OVERLAY, alpha),
        ));
    }

    vertices
}
