use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::layout::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    Directional,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    pub intensity: f32,
    pub color: Rgb,
}

/// Fixed lighting rig: soft ambient fill, a warm key light and two point
/// lights (a pink rim from below and a white glow at the heart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingRig {
    pub ambient_intensity: f32,
    pub lights: Vec<Light>,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.6,
            lights: vec![
                Light {
                    kind: LightKind::Directional,
                    position: Vec3::new(10.0, 10.0, 5.0),
                    intensity: 1.0,
                    color: Rgb::from_hex(0xffd700),
                },
                Light {
                    kind: LightKind::Point,
                    position: Vec3::new(-10.0, -10.0, -5.0),
                    intensity: 0.8,
                    color: Rgb::from_hex(0xff69b4),
                },
                Light {
                    kind: LightKind::Point,
                    position: Vec3::ZERO,
                    intensity: 2.0,
                    color: Rgb::WHITE,
                },
            ],
        }
    }
}
