//! Extruded heart solid shown at the centre of the scene.
//!
//! The outline is four cubic Bézier segments; it is sampled, extruded along
//! +Z and bevelled on both caps. The result never depends on the session, so
//! it is built once alongside the rest of the layout.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub const HEART_DEPTH: f32 = 0.3;
pub const HEART_BEVEL_THICKNESS: f32 = 0.1;
/// Outward growth of the walls relative to the caps.
pub const HEART_BEVEL_SIZE: f32 = HEART_BEVEL_THICKNESS - 0.1;
pub const HEART_BEVEL_SEGMENTS: usize = 3;
pub const HEART_CURVE_SEGMENTS: usize = 12;

/// Interior point from which every outline vertex is visible; caps are fanned
/// from here.
const CAP_ANCHOR: Vec2 = Vec2::new(0.0, 0.3);

const OUTLINE: [[Vec2; 4]; 4] = [
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, -0.3),
        Vec2::new(-0.6, -0.3),
        Vec2::new(-0.6, 0.0),
    ],
    [
        Vec2::new(-0.6, 0.0),
        Vec2::new(-0.6, 0.3),
        Vec2::new(0.0, 0.6),
        Vec2::new(0.0, 1.0),
    ],
    [
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, 0.6),
        Vec2::new(0.6, 0.3),
        Vec2::new(0.6, 0.0),
    ],
    [
        Vec2::new(0.6, 0.0),
        Vec2::new(0.6, -0.3),
        Vec2::new(0.0, -0.3),
        Vec2::new(0.0, 0.0),
    ],
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartMesh {
    /// Closed counter-clockwise outline in the XY plane.
    pub outline: Vec<Vec2>,
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl HeartMesh {
    pub fn build() -> Self {
        let outline = sample_outline(HEART_CURVE_SEGMENTS);
        let normals = vertex_normals(&outline);
        let layers = extrusion_layers();
        let ring = outline.len();

        let mut vertices = Vec::with_capacity(ring * layers.len() + 2);
        for &(z, grow) in &layers {
            for (point, normal) in outline.iter().zip(&normals) {
                let p = *point + *normal * grow;
                vertices.push(p.extend(z));
            }
        }

        let mut indices = Vec::new();
        for layer in 0..layers.len() - 1 {
            let base = (layer * ring) as u32;
            let next = base + ring as u32;
            for i in 0..ring as u32 {
                let j = (i + 1) % ring as u32;
                indices.extend_from_slice(&[base + i, base + j, next + j]);
                indices.extend_from_slice(&[base + i, next + j, next + i]);
            }
        }

        let back_z = layers[0].0;
        let front_z = layers[layers.len() - 1].0;
        let back_anchor = vertices.len() as u32;
        vertices.push(CAP_ANCHOR.extend(back_z));
        let front_anchor = vertices.len() as u32;
        vertices.push(CAP_ANCHOR.extend(front_z));

        let front_base = ((layers.len() - 1) * ring) as u32;
        for i in 0..ring as u32 {
            let j = (i + 1) % ring as u32;
            // Back cap faces -Z, front cap faces +Z.
            indices.extend_from_slice(&[back_anchor, j, i]);
            indices.extend_from_slice(&[front_anchor, front_base + i, front_base + j]);
        }

        Self {
            outline,
            vertices,
            indices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), v| (min.min(*v), max.max(*v)),
        )
    }
}

fn cubic(points: &[Vec2; 4], t: f32) -> Vec2 {
    let u = 1.0 - t;
    points[0] * (u * u * u)
        + points[1] * (3.0 * u * u * t)
        + points[2] * (3.0 * u * t * t)
        + points[3] * (t * t * t)
}

fn sample_outline(segments: usize) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = OUTLINE
        .iter()
        .flat_map(|curve| (0..segments).map(move |k| cubic(curve, k as f32 / segments as f32)))
        .collect();

    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    points
}

fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

/// Outward unit normals for a counter-clockwise outline.
fn vertex_normals(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            let tangent = (next - prev).normalize_or_zero();
            Vec2::new(tangent.y, -tangent.x)
        })
        .collect()
}

/// `(z, outward growth)` for each ring from the back cap to the front cap.
fn extrusion_layers() -> Vec<(f32, f32)> {
    let bevel = |b: usize| {
        let t = b as f32 / HEART_BEVEL_SEGMENTS as f32;
        (
            HEART_BEVEL_THICKNESS * (t * FRAC_PI_2).cos(),
            HEART_BEVEL_SIZE * (t * FRAC_PI_2).sin(),
        )
    };

    let mut layers: Vec<(f32, f32)> = (0..HEART_BEVEL_SEGMENTS)
        .map(bevel)
        .map(|(dz, grow)| (-dz, grow))
        .collect();
    layers.push((0.0, HEART_BEVEL_SIZE));
    layers.push((HEART_DEPTH, HEART_BEVEL_SIZE));
    layers.extend(
        (0..HEART_BEVEL_SEGMENTS)
            .rev()
            .map(bevel)
            .map(|(dz, grow)| (HEART_DEPTH + dz, grow)),
    );
    layers
}
