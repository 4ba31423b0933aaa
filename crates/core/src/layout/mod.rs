//! Procedural placement of the decorative objects.
//!
//! Every field except the star rotation is a pure function of the object
//! index; the rotation comes from a [`RotationSource`] so a seeded session is
//! fully reproducible.

pub mod color;
pub mod heart;

use std::f32::consts::{FRAC_PI_4, PI, TAU};

use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    config::LayoutConfig,
    starfield::{Starfield, StarfieldParams},
};
pub use color::Rgb;
pub use heart::HeartMesh;

pub const ORB_BASE_RADIUS: f32 = 6.0;
pub const ORB_RADIUS_JITTER: f32 = 2.0;
pub const ORB_HEIGHT_SCALE: f32 = 3.0;
pub const ORB_BASE_SCALE: f32 = 0.3;
pub const ORB_SCALE_JITTER: f32 = 0.2;
pub const ORB_HUE_STEP: i32 = 25;

pub const STAR_BASE_RADIUS: f32 = 4.0;
pub const STAR_RADIUS_JITTER: f32 = 1.5;
pub const STAR_HEIGHT_SCALE: f32 = 2.0;
pub const STAR_BASE_HUE: i32 = 45;
pub const STAR_HUE_STEP: i32 = 15;

pub const HEART_COLOR: u32 = 0xff69b4;
pub const HEART_EMISSIVE: u32 = 0xff1493;

/// Spacing of per-object animation phases (the golden angle, in radians).
const PHASE_STEP: f32 = 2.399_963;
const STAR_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Orbs,
    Stars,
    Heart,
}

impl GroupKind {
    pub const ALL: [GroupKind; 3] = [GroupKind::Heart, GroupKind::Orbs, GroupKind::Stars];

    /// Parameters of the per-object float/bob layered over the group motion.
    pub fn float_profile(self) -> FloatProfile {
        match self {
            GroupKind::Orbs => FloatProfile {
                speed_base: 1.0,
                speed_step: 0.2,
                rotation_intensity: 0.5,
                float_intensity: 0.8,
            },
            GroupKind::Stars => FloatProfile {
                speed_base: 0.8,
                speed_step: 0.3,
                rotation_intensity: 1.0,
                float_intensity: 0.6,
            },
            GroupKind::Heart => FloatProfile {
                speed_base: 1.5,
                speed_step: 0.0,
                rotation_intensity: 0.3,
                float_intensity: 0.5,
            },
        }
    }

    /// Group-level spin about [`GroupSpin::axis`].
    pub fn spin(self) -> GroupSpin {
        let speed = match self {
            GroupKind::Orbs => 0.2,
            GroupKind::Stars => 0.0,
            GroupKind::Heart => 0.5,
        };
        GroupSpin {
            axis: Vec3::Y,
            speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatProfile {
    pub speed_base: f32,
    pub speed_step: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl FloatProfile {
    pub fn speed(&self, index: usize) -> f32 {
        self.speed_base + index as f32 * self.speed_step
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSpin {
    pub axis: Vec3,
    /// Radians per second.
    pub speed: f32,
}

/// Where star rotations come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationSource {
    Seeded(u64),
    Entropy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Unit sphere; the object scale is its radius.
    Sphere { segments: u32 },
    Cone { radius: f32, height: f32, sides: u32 },
    Heart,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// `None` glows in the object's own color.
    pub emissive: Option<Rgb>,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorativeObject {
    pub position: Vec3,
    pub scale: f32,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    pub color: Rgb,
    pub color_tag: String,
    pub animation_phase: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub kind: GroupKind,
    pub geometry: Geometry,
    pub material: Material,
    pub objects: Vec<DecorativeObject>,
}

impl ObjectGroup {
    pub fn new(kind: GroupKind, count: i32, rotation: RotationSource) -> Self {
        let (geometry, material) = match kind {
            GroupKind::Orbs => (
                Geometry::Sphere { segments: 16 },
                Material {
                    emissive: None,
                    emissive_intensity: 0.3,
                    metalness: 0.8,
                    roughness: 0.2,
                },
            ),
            GroupKind::Stars => (
                Geometry::Cone {
                    radius: 0.3,
                    height: 0.8,
                    sides: 5,
                },
                Material {
                    emissive: None,
                    emissive_intensity: 0.2,
                    metalness: 0.0,
                    roughness: 1.0,
                },
            ),
            GroupKind::Heart => (
                Geometry::Heart,
                Material {
                    emissive: Some(Rgb::from_hex(HEART_EMISSIVE)),
                    emissive_intensity: 0.4,
                    metalness: 0.7,
                    roughness: 0.3,
                },
            ),
        };

        Self {
            kind,
            geometry,
            material,
            objects: generate(kind, count, rotation),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn spin(&self) -> GroupSpin {
        self.kind.spin()
    }
}

/// Places `count` objects of the given group. Non-positive counts yield an
/// empty sequence; the heart group never holds more than one object.
pub fn generate(kind: GroupKind, count: i32, rotation: RotationSource) -> Vec<DecorativeObject> {
    if count <= 0 {
        return Vec::new();
    }

    match kind {
        GroupKind::Orbs => (0..count as usize).map(|i| orb(i, count as usize)).collect(),
        GroupKind::Stars => {
            let mut entropy = rand::thread_rng();
            (0..count as usize)
                .map(|i| {
                    let rotation = match rotation {
                        RotationSource::Seeded(seed) => {
                            random_rotation(&mut StdRng::seed_from_u64(star_seed(seed, i)))
                        }
                        RotationSource::Entropy => random_rotation(&mut entropy),
                    };
                    star(i, count as usize, rotation)
                })
                .collect()
        }
        GroupKind::Heart => vec![heart()],
    }
}

pub fn orb_radius(index: usize) -> f32 {
    ORB_BASE_RADIUS + (index as f32).sin() * ORB_RADIUS_JITTER
}

pub fn star_radius(index: usize) -> f32 {
    STAR_BASE_RADIUS + (index as f32).cos() * STAR_RADIUS_JITTER
}

/// Hue in degrees; the index is reduced first so large indices cannot overflow.
fn orb_hue(index: usize) -> i32 {
    ((index % 360) as i32 * ORB_HUE_STEP).rem_euclid(360)
}

fn star_hue(index: usize) -> i32 {
    (STAR_BASE_HUE + (index % 360) as i32 * STAR_HUE_STEP).rem_euclid(360)
}

fn ring_angle(index: usize, count: usize) -> f32 {
    index as f32 / count as f32 * TAU
}

fn phase(index: usize) -> f32 {
    index as f32 * PHASE_STEP
}

fn orb(index: usize, count: usize) -> DecorativeObject {
    let i = index as f32;
    let angle = ring_angle(index, count);
    let radius = orb_radius(index);
    let hue = orb_hue(index);

    DecorativeObject {
        position: Vec3::new(
            angle.cos() * radius,
            (i * 0.5).sin() * ORB_HEIGHT_SCALE,
            angle.sin() * radius,
        ),
        scale: ORB_BASE_SCALE + i.sin() * ORB_SCALE_JITTER,
        rotation: Vec3::ZERO,
        color: Rgb::from_hsl(hue as f32, 0.7, 0.6),
        color_tag: color::hsl_tag(hue, 70, 60),
        animation_phase: phase(index),
    }
}

fn star(index: usize, count: usize, rotation: Vec3) -> DecorativeObject {
    let angle = ring_angle(index, count);
    let radius = star_radius(index);
    let hue = star_hue(index);

    DecorativeObject {
        position: Vec3::new(
            angle.cos() * radius,
            (angle + FRAC_PI_4).sin() * STAR_HEIGHT_SCALE,
            angle.sin() * radius,
        ),
        scale: 1.0,
        rotation,
        color: Rgb::from_hsl(hue as f32, 0.8, 0.7),
        color_tag: color::hsl_tag(hue, 80, 70),
        animation_phase: phase(index),
    }
}

fn heart() -> DecorativeObject {
    DecorativeObject {
        position: Vec3::ZERO,
        scale: 1.0,
        // Flipped about Z so the tip points down.
        rotation: Vec3::new(0.0, 0.0, PI),
        color: Rgb::from_hex(HEART_COLOR),
        color_tag: color::hex_tag(HEART_COLOR),
        animation_phase: 0.0,
    }
}

fn star_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(STAR_SEED_SALT)
}

fn random_rotation<R: Rng>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen::<f32>() * PI,
        rng.gen::<f32>() * PI,
        rng.gen::<f32>() * PI,
    )
}

/// All object groups of one session plus the shared heart geometry and the
/// background star points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub heart: ObjectGroup,
    pub orbs: ObjectGroup,
    pub stars: ObjectGroup,
    pub heart_mesh: HeartMesh,
    pub starfield: Starfield,
}

impl SceneLayout {
    pub fn generate(config: &LayoutConfig) -> Self {
        let rotation = config.rotation_source();
        Self {
            heart: ObjectGroup::new(GroupKind::Heart, 1, rotation),
            orbs: ObjectGroup::new(GroupKind::Orbs, config.orb_count, rotation),
            stars: ObjectGroup::new(GroupKind::Stars, config.star_count, rotation),
            heart_mesh: HeartMesh::build(),
            starfield: Starfield::generate(
                StarfieldParams::default(),
                config.seed.unwrap_or_else(rand::random),
            ),
        }
    }

    pub fn group(&self, kind: GroupKind) -> &ObjectGroup {
        match kind {
            GroupKind::Heart => &self.heart,
            GroupKind::Orbs => &self.orbs,
            GroupKind::Stars => &self.stars,
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = &ObjectGroup> {
        GroupKind::ALL.into_iter().map(move |kind| self.group(kind))
    }

    pub fn object_count(&self) -> usize {
        self.groups().map(ObjectGroup::len).sum()
    }
}
